use std::path::{Path, PathBuf};

use image::{imageops, EncodableLayout, ImageBuffer, Pixel, PixelWithColorType, Rgba};
use serde::{Deserialize, Serialize};

use super::{apply_all, PixelRect, Region, SliceError, Transform};
use crate::image_util::{ImageBufferExt as _, PngOptions};

/// Fill color for regions that were already extracted from the working copy.
pub const REDACTED: Rgba<u8> = Rgba([128, 0, 128, 255]);

/// [`REDACTED`] at 16 bits per channel.
pub const REDACTED_16: Rgba<u16> = Rgba([32896, 0, 32896, 65535]);

/// Pixel formats a working copy is sliced in.
pub trait AtlasPixel: Pixel + PixelWithColorType + 'static {
    /// Sentinel painted over extracted regions.
    const REDACTED: Self;
}

impl AtlasPixel for Rgba<u8> {
    const REDACTED: Self = REDACTED;
}

impl AtlasPixel for Rgba<u16> {
    const REDACTED: Self = REDACTED_16;
}

/// One named sprite cut out of an atlas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    path: PathBuf,
    region: Region,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    transforms: Vec<Transform>,
}

impl OutputSpec {
    pub fn new(path: impl Into<PathBuf>, region: Region) -> Self {
        Self {
            path: path.into(),
            region,
            transforms: Vec::new(),
        }
    }

    #[must_use]
    pub fn apply(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Resolve the region against `working`, checking it against the image bounds.
    pub fn pixel_rect<P: Pixel>(
        &self,
        working: &ImageBuffer<P, Vec<P::Subpixel>>,
    ) -> Result<PixelRect, SliceError> {
        let (width, height) = working.dimensions();
        let rect = self.region.project(width, height);

        if rect.is_empty() {
            return Err(SliceError::EmptyRegion {
                path: self.path.clone(),
                width,
                height,
            });
        }

        if !rect.fits_within(width, height) {
            return Err(SliceError::OutOfBounds {
                path: self.path.clone(),
                rect,
                width,
                height,
            });
        }

        Ok(rect)
    }

    /// Extract, transform and write this sprite, then redact it from `working`.
    ///
    /// Returns the path of the written file.
    pub fn process<P>(
        &self,
        working: &mut ImageBuffer<P, Vec<P::Subpixel>>,
        output_root: &Path,
        options: PngOptions,
    ) -> Result<PathBuf, SliceError>
    where
        P: AtlasPixel,
        P::Subpixel: 'static,
        [P::Subpixel]: EncodableLayout,
    {
        let rect = self.pixel_rect(&*working)?;
        let out_path = output_root.join(&self.path);

        let sprite = imageops::crop_imm(&*working, rect.x, rect.y, rect.width, rect.height).to_image();
        let sprite =
            apply_all(self.transforms(), sprite).map_err(|source| SliceError::Transform {
                path: out_path.clone(),
                source,
            })?;

        sprite
            .save_png(&out_path, options)
            .map_err(|source| SliceError::Write {
                path: out_path.clone(),
                source,
            })?;

        redact(working, rect);

        info!("{}", out_path.display());

        Ok(out_path)
    }
}

/// Overwrite `rect` with the sentinel of the image's pixel format.
pub fn redact<P: AtlasPixel>(image: &mut ImageBuffer<P, Vec<P::Subpixel>>, rect: PixelRect) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            image.put_pixel(x, y, P::REDACTED);
        }
    }
}
