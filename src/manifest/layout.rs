//! Helpers for declaring regions on the uniform grids atlases are laid out on.

use crate::slicer::{Region, RegionError};

pub const REF_256: (u32, u32) = (256, 256);
pub const REF_128: (u32, u32) = (128, 128);

/// A uniform grid of `cell_w`x`cell_h` cells, shifted by an offset, declared
/// against a reference resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell_w: u32,
    cell_h: u32,
    offset_x: u32,
    offset_y: u32,
    reference: (u32, u32),
}

impl Grid {
    #[must_use]
    pub const fn new(cell_w: u32, cell_h: u32, reference: (u32, u32)) -> Self {
        Self {
            cell_w,
            cell_h,
            offset_x: 0,
            offset_y: 0,
            reference,
        }
    }

    #[must_use]
    pub const fn with_offset(mut self, x: u32, y: u32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// A single cell at column `x`, row `y`.
    pub fn cell(&self, x: u32, y: u32) -> Result<Region, RegionError> {
        self.span(x, y, 1, 1)
    }

    /// `w`x`h` cells starting at column `x`, row `y`.
    pub fn span(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Region, RegionError> {
        // saturate so overflowing declarations fail the grid bounds check
        Region::new(
            self.cell_w.saturating_mul(x).saturating_add(self.offset_x),
            self.cell_h.saturating_mul(y).saturating_add(self.offset_y),
            self.cell_w.saturating_mul(w),
            self.cell_h.saturating_mul(h),
            self.reference.0,
            self.reference.1,
        )
    }
}

/// A box that does not sit on any grid, in pixels of `reference`.
pub fn fixed(reference: (u32, u32), x: u32, y: u32, w: u32, h: u32) -> Result<Region, RegionError> {
    Region::new(x, y, w, h, reference.0, reference.1)
}
