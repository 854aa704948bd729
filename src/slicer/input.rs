use std::path::{Path, PathBuf};

use image::{EncodableLayout, ImageBuffer};
use serde::{Deserialize, Serialize};

use super::{AtlasPixel, OutputSpec, SliceError};
use crate::image_util::{self, ImageBufferExt as _, PngOptions, WorkingImage};

/// An atlas together with the sprites that are cut out of it, in extraction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    path: PathBuf,

    #[serde(default)]
    outputs: Vec<OutputSpec>,
}

impl InputSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            outputs: Vec::new(),
        }
    }

    #[must_use]
    pub fn output(mut self, output: OutputSpec) -> Self {
        self.outputs.push(output);
        self
    }

    #[must_use]
    pub fn outputs(mut self, outputs: impl IntoIterator<Item = OutputSpec>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn output_specs(&self) -> &[OutputSpec] {
        &self.outputs
    }

    /// Slice this atlas from `input_root` into `output_root`.
    ///
    /// A missing atlas is reported as [`SliceError::MissingInput`] before anything
    /// is written. When `leftover_root` is set the redacted working copy is written
    /// there under the atlas' own relative path.
    ///
    /// Returns the number of sprites written.
    pub fn process(
        &self,
        input_root: &Path,
        output_root: &Path,
        leftover_root: Option<&Path>,
        options: PngOptions,
    ) -> Result<usize, SliceError> {
        let source = input_root.join(&self.path);
        if !source.is_file() {
            return Err(SliceError::MissingInput(source));
        }

        let working =
            image_util::load_image_from_file(&source).map_err(|source_err| SliceError::Decode {
                path: source.clone(),
                source: source_err,
            })?;

        let (width, height) = working.dimensions();
        debug!(
            "{}: {width}x{height}, {} sprites",
            source.display(),
            self.outputs.len()
        );
        self.check_scale(&source, width, height);

        match working {
            WorkingImage::Rgba8(image) => self.slice(image, output_root, leftover_root, options),
            WorkingImage::Rgba16(image) => self.slice(image, output_root, leftover_root, options),
        }
    }

    /// Run every output against the decoded working copy, then write the leftover.
    fn slice<P>(
        &self,
        mut working: ImageBuffer<P, Vec<P::Subpixel>>,
        output_root: &Path,
        leftover_root: Option<&Path>,
        options: PngOptions,
    ) -> Result<usize, SliceError>
    where
        P: AtlasPixel,
        P::Subpixel: 'static,
        [P::Subpixel]: EncodableLayout,
    {
        for output in &self.outputs {
            output.process(&mut working, output_root, options)?;
        }

        if let Some(leftover_root) = leftover_root {
            let leftover = leftover_root.join(&self.path);
            working
                .save_png(&leftover, options)
                .map_err(|source| SliceError::Write {
                    path: leftover.clone(),
                    source,
                })?;

            info!("{}", leftover.display());
        }

        Ok(self.outputs.len())
    }

    fn check_scale(&self, source: &Path, width: u32, height: u32) {
        let mut reported = Vec::new();

        for output in &self.outputs {
            let region = output.region();
            let reference = region.reference();

            if region.scales_exactly(width, height) || reported.contains(&reference) {
                continue;
            }

            warn!(
                "{}: {width}x{height} is not a multiple of the {}x{} reference grid, sprite bounds are truncated",
                source.display(),
                reference.0,
                reference.1
            );
            reported.push(reference);
        }
    }
}
