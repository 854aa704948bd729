pub mod builtin;
pub mod layout;

use std::{
    fs::File,
    io::BufReader,
    path::{Component, Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::slicer::{InputSpec, RegionError};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("invalid manifest: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("invalid region: {0}")]
    RegionError(#[from] RegionError),

    #[error("manifest path must be relative and stay inside its root: {}", .0.display())]
    PathEscapesRoot(PathBuf),
}

/// Every atlas to slice, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    inputs: Vec<InputSpec>,
}

impl Manifest {
    #[must_use]
    pub const fn new() -> Self {
        Self { inputs: Vec::new() }
    }

    #[must_use]
    pub fn input(mut self, input: InputSpec) -> Self {
        self.inputs.push(input);
        self
    }

    #[must_use]
    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    #[must_use]
    pub fn sprite_count(&self) -> usize {
        self.inputs
            .iter()
            .map(|input| input.output_specs().len())
            .sum()
    }

    /// Load a JSON manifest. The result is already validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let reader = BufReader::new(File::open(path)?);
        let manifest: Self = serde_json::from_reader(reader)?;
        manifest.validate()?;

        Ok(manifest)
    }

    /// Reject paths that would leave their root folder and warn about overlapping sprites.
    ///
    /// Overlaps are allowed but the later sprite will contain redaction color
    /// from the earlier one.
    pub fn validate(&self) -> Result<(), ManifestError> {
        for input in &self.inputs {
            check_relative(input.path())?;

            for output in input.output_specs() {
                check_relative(output.path())?;
            }

            let outputs = input.output_specs();
            for (idx, a) in outputs.iter().enumerate() {
                for b in &outputs[idx + 1..] {
                    // project both onto a grid that is a multiple of each reference
                    let (aw, ah) = a.region().reference();
                    let (bw, bh) = b.region().reference();
                    let (width, height) = (aw.saturating_mul(bw), ah.saturating_mul(bh));

                    if a.region().project(width, height).overlaps(&b.region().project(width, height)) {
                        warn!(
                            "{}: {} overlaps {}",
                            input.path().display(),
                            a.path().display(),
                            b.path().display()
                        );
                    }
                }
            }
        }

        Ok(())
    }
}

fn check_relative(path: &Path) -> Result<(), ManifestError> {
    let escapes = path.as_os_str().is_empty()
        || path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if escapes {
        return Err(ManifestError::PathEscapesRoot(path.to_path_buf()));
    }

    Ok(())
}
