use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    #[error("reference grid must not be empty, got {0}x{1}")]
    EmptyGrid(u32, u32),

    #[error("region must not be empty, got {0}x{1}")]
    EmptyRegion(u32, u32),

    #[error("region {x},{y} {w}x{h} exceeds its {ref_w}x{ref_h} reference grid")]
    OutsideGrid {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        ref_w: u32,
        ref_h: u32,
    },
}

/// A rectangle declared in reference grid units.
///
/// Regions are resolution independent: the same region applies to a 16x
/// texture pack and its 4x upscale, see [`Region::project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RegionDef", into = "RegionDef")]
pub struct Region {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    ref_w: u32,
    ref_h: u32,
}

#[derive(Serialize, Deserialize)]
struct RegionDef {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    ref_w: u32,
    ref_h: u32,
}

impl TryFrom<RegionDef> for Region {
    type Error = RegionError;

    fn try_from(def: RegionDef) -> Result<Self, Self::Error> {
        Self::new(def.x, def.y, def.w, def.h, def.ref_w, def.ref_h)
    }
}

impl From<Region> for RegionDef {
    fn from(region: Region) -> Self {
        Self {
            x: region.x,
            y: region.y,
            w: region.w,
            h: region.h,
            ref_w: region.ref_w,
            ref_h: region.ref_h,
        }
    }
}

impl Region {
    pub fn new(x: u32, y: u32, w: u32, h: u32, ref_w: u32, ref_h: u32) -> Result<Self, RegionError> {
        if ref_w == 0 || ref_h == 0 {
            return Err(RegionError::EmptyGrid(ref_w, ref_h));
        }

        if w == 0 || h == 0 {
            return Err(RegionError::EmptyRegion(w, h));
        }

        if u64::from(x) + u64::from(w) > u64::from(ref_w)
            || u64::from(y) + u64::from(h) > u64::from(ref_h)
        {
            return Err(RegionError::OutsideGrid {
                x,
                y,
                w,
                h,
                ref_w,
                ref_h,
            });
        }

        Ok(Self {
            x,
            y,
            w,
            h,
            ref_w,
            ref_h,
        })
    }

    /// Map this region onto an image of `width`x`height` pixels.
    ///
    /// Every coordinate is scaled with truncating integer division
    /// (`v * actual / reference`). This is exact whenever the actual size is a
    /// multiple of the reference grid and rounds toward zero otherwise.
    #[must_use]
    pub fn project(&self, width: u32, height: u32) -> PixelRect {
        PixelRect {
            x: scale(self.x, width, self.ref_w),
            y: scale(self.y, height, self.ref_h),
            width: scale(self.w, width, self.ref_w),
            height: scale(self.h, height, self.ref_h),
        }
    }

    #[must_use]
    pub const fn reference(&self) -> (u32, u32) {
        (self.ref_w, self.ref_h)
    }

    /// Whether an image of the given size is an integer multiple of the reference grid.
    #[must_use]
    pub const fn scales_exactly(&self, width: u32, height: u32) -> bool {
        width % self.ref_w == 0 && height % self.ref_h == 0
    }
}

const fn scale(value: u32, actual: u32, reference: u32) -> u32 {
    // value <= reference, so the result never exceeds `actual`
    (value as u64 * actual as u64 / reference as u64) as u32
}

/// A region resolved to pixel coordinates of one concrete image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }

    #[cfg(test)]
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x - self.x < self.width && y - self.y < self.height
    }

    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        (self.x as u64) < other.x as u64 + other.width as u64
            && (other.x as u64) < self.x as u64 + self.width as u64
            && (self.y as u64) < other.y as u64 + other.height as u64
            && (other.y as u64) < self.y as u64 + self.height as u64
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
