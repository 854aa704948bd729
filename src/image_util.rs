use std::{fs, ops::Deref, path::Path};

use clap::{builder::PossibleValue, ValueEnum};
use image::{
    codecs::png, EncodableLayout, ImageBuffer, ImageEncoder, Pixel, PixelWithColorType, Rgba,
    RgbaImage,
};
use strum::{EnumIter, VariantArray};

/// oxipng preset used by `--optimize`, 0 (fast) to 6 (slow).
const OXIPNG_PRESET: u8 = 4;

#[derive(Debug, thiserror::Error)]
pub enum ImgUtilError {
    #[error("io error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("png optimization error: {0}")]
    OptimizeError(#[from] oxipng::PngError),
}

type ImgUtilResult<T> = std::result::Result<T, ImgUtilError>;

pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// A decoded source image in the pixel format it is sliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingImage {
    Rgba8(RgbaImage),
    Rgba16(Rgba16Image),
}

impl WorkingImage {
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Rgba8(image) => image.dimensions(),
            Self::Rgba16(image) => image.dimensions(),
        }
    }
}

#[cfg(test)]
impl WorkingImage {
    pub fn into_rgba8(self) -> RgbaImage {
        match self {
            Self::Rgba8(image) => image,
            Self::Rgba16(_) => panic!("expected an 8-bit image"),
        }
    }

    pub fn into_rgba16(self) -> Rgba16Image {
        match self {
            Self::Rgba16(image) => image,
            Self::Rgba8(_) => panic!("expected a 16-bit image"),
        }
    }
}

/// Decode an image into RGBA at the channel depth of the source.
///
/// Up to 8 bits per channel become RGBA8, anything deeper becomes RGBA16.
pub fn load_image_from_file(path: &Path) -> ImgUtilResult<WorkingImage> {
    let image = image::open(path)?;
    let color = image.color();

    if color.bytes_per_pixel() > color.channel_count() {
        Ok(WorkingImage::Rgba16(image.into_rgba16()))
    } else {
        Ok(WorkingImage::Rgba8(image.into_rgba8()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, VariantArray)]
pub enum Compression {
    Fast,
    Default,
    #[default]
    Best,
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Default => write!(f, "default"),
            Self::Best => write!(f, "best"),
        }
    }
}

impl From<Compression> for png::CompressionType {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Fast => Self::Fast,
            Compression::Default => Self::Default,
            Compression::Best => Self::Best,
        }
    }
}

impl ValueEnum for Compression {
    fn value_variants<'a>() -> &'a [Self] {
        Self::VARIANTS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(match self {
            Self::Fast => "fast",
            Self::Default => "default",
            Self::Best => "best",
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PngOptions {
    pub compression: Compression,

    /// Run a lossless oxipng pass over the encoded file.
    pub optimize: bool,
}

pub trait ImageBufferExt<P, C> {
    /// Encode as PNG and write to `path`, creating parent folders and
    /// replacing any existing file.
    fn save_png(&self, path: impl AsRef<Path>, options: PngOptions) -> ImgUtilResult<()>;
}

impl<P, C> ImageBufferExt<P, C> for ImageBuffer<P, C>
where
    P: Pixel + PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
    C: Deref<Target = [P::Subpixel]>,
{
    fn save_png(&self, path: impl AsRef<Path>, options: PngOptions) -> ImgUtilResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let (width, height) = self.dimensions();
        let mut data = Vec::new();
        png::PngEncoder::new_with_quality(
            &mut data,
            options.compression.into(),
            png::FilterType::Adaptive,
        )
        .write_image(
            self.as_bytes(),
            width,
            height,
            <P as PixelWithColorType>::COLOR_TYPE,
        )?;

        if options.optimize {
            let optimized =
                oxipng::optimize_from_memory(&data, &oxipng::Options::from_preset(OXIPNG_PRESET))?;

            trace!(
                "{}: oxipng {} -> {} bytes",
                path.display(),
                data.len(),
                optimized.len()
            );

            if optimized.len() < data.len() {
                data = optimized;
            }
        }

        fs::write(path, data)?;

        Ok(())
    }
}
