mod engine;
mod input;
mod output;
mod region;
mod transform;

pub use engine::*;
pub use input::*;
pub use output::*;
pub use region::*;
pub use transform::*;

use std::path::PathBuf;

use crate::image_util::ImgUtilError;

#[derive(Debug, thiserror::Error)]
pub enum SliceError {
    #[error("input file {} not found", .0.display())]
    MissingInput(PathBuf),

    #[error("{}: unable to decode: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: ImgUtilError,
    },

    #[error("{}: unable to write: {source}", path.display())]
    Write {
        path: PathBuf,
        source: ImgUtilError,
    },

    #[error("{}: {source}", path.display())]
    Transform {
        path: PathBuf,
        source: TransformError,
    },

    #[error("{}: region {rect} exceeds the {width}x{height} source image", path.display())]
    OutOfBounds {
        path: PathBuf,
        rect: PixelRect,
        width: u32,
        height: u32,
    },

    #[error("{}: region is empty when scaled to a {width}x{height} source image", path.display())]
    EmptyRegion {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}
