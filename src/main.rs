use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;

#[macro_use]
extern crate log;

mod archive;
mod image_util;
mod logger;
mod manifest;
mod slicer;

#[cfg(test)]
mod test_util;

use archive::{ArchiveError, InputRoot};
use image_util::{Compression, PngOptions};
use manifest::{Manifest, ManifestError};
use slicer::{SliceEngine, SliceError};

/// Slice texture atlases into individual sprite files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Folder or .zip file containing the source atlases.
    input: PathBuf,

    /// Output folder for the sliced sprites.
    output: PathBuf,

    /// Output folder for the leftover atlases.
    /// Everything that was sliced out is painted over, so only unclaimed pixels remain visible.
    #[clap(verbatim_doc_comment)]
    leftover: Option<PathBuf>,

    /// Read the manifest from a JSON file instead of using the built-in one.
    #[clap(short, long)]
    manifest: Option<PathBuf>,

    /// PNG compression level of the written images.
    #[clap(short, long, default_value_t = Compression::Best)]
    compression: Compression,

    /// Run a lossless oxipng pass over every written image.
    #[clap(long, action)]
    optimize: bool,
}

#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ArchiveError(#[from] ArchiveError),

    #[error("{0}")]
    ManifestError(#[from] ManifestError),

    #[error("{0}")]
    SliceError(#[from] SliceError),

    #[error("output path is not a directory: {}", .0.display())]
    OutputPathNotDir(PathBuf),
}

impl Cli {
    fn execute(&self) -> Result<(), CommandError> {
        let manifest = match &self.manifest {
            Some(path) => {
                info!("using manifest {}", path.display());
                Manifest::from_json_file(path)?
            }
            None => manifest::builtin::minecraft()?,
        };

        // an extracted zip is removed again when `input` is dropped
        let input = InputRoot::resolve(&self.input)?;

        prepare_dir(&self.output)?;
        if let Some(leftover) = &self.leftover {
            prepare_dir(leftover)?;
        }

        debug!(
            "slicing {} atlases into {} sprites",
            manifest.inputs().len(),
            manifest.sprite_count()
        );

        let engine = SliceEngine::new(PngOptions {
            compression: self.compression,
            optimize: self.optimize,
        });
        let summary = engine.run(
            &manifest,
            input.path(),
            &self.output,
            self.leftover.as_deref(),
        )?;

        info!(
            "sliced {} sprites from {} atlases",
            summary.sprites, summary.processed
        );

        // each skipped atlas was already warned about by the engine
        if !summary.skipped.is_empty() {
            info!("skipped {} missing atlases", summary.skipped.len());
        }

        Ok(())
    }
}

fn prepare_dir(path: &Path) -> Result<(), CommandError> {
    fs::create_dir_all(path)?;

    if !path.is_dir() {
        return Err(CommandError::OutputPathNotDir(path.to_path_buf()));
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Cli::parse();
    logger::init("info");
    info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    if let Err(err) = args.execute() {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
