use std::path::{Path, PathBuf};

use super::SliceError;
use crate::{image_util::PngOptions, manifest::Manifest};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Atlases that were sliced.
    pub processed: usize,

    /// Sprites written across all atlases.
    pub sprites: usize,

    /// Atlases that were not found under the input root.
    pub skipped: Vec<PathBuf>,
}

/// Drives a [`Manifest`], one atlas at a time in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceEngine {
    options: PngOptions,
}

impl SliceEngine {
    #[must_use]
    pub const fn new(options: PngOptions) -> Self {
        Self { options }
    }

    /// Missing atlases are skipped with a warning, every other error aborts the run.
    pub fn run(
        &self,
        manifest: &Manifest,
        input_root: &Path,
        output_root: &Path,
        leftover_root: Option<&Path>,
    ) -> Result<RunSummary, SliceError> {
        let mut summary = RunSummary::default();

        for input in manifest.inputs() {
            match input.process(input_root, output_root, leftover_root, self.options) {
                Ok(sprites) => {
                    summary.processed += 1;
                    summary.sprites += sprites;
                }
                Err(SliceError::MissingInput(path)) => {
                    warn!("input file {} not found, skipping!", path.display());
                    summary.skipped.push(path);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use image::{imageops, Rgba, RgbaImage};

    use super::*;
    use crate::{
        image_util::load_image_from_file,
        slicer::{InputSpec, OutputSpec, PixelRect, Region, REDACTED},
        test_util::unique_temp_dir,
    };

    fn atlas(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            Rgba([x as u8, y as u8, (x + y) as u8, 255])
        })
    }

    fn corners_manifest(path: &str) -> InputSpec {
        InputSpec::new(path).outputs([
            OutputSpec::new("sprites/first.png", Region::new(0, 0, 16, 16, 128, 128).unwrap()),
            OutputSpec::new(
                "sprites/second.png",
                Region::new(112, 112, 16, 16, 128, 128).unwrap(),
            ),
        ])
    }

    #[test]
    fn slices_upscaled_atlas_end_to_end() {
        let dir = unique_temp_dir("engine-e2e");
        let (input_root, output_root, leftover_root) =
            (dir.join("in"), dir.join("out"), dir.join("left"));

        let original = atlas(256);
        fs::create_dir_all(&input_root).unwrap();
        original.save(input_root.join("sheet.png")).unwrap();

        let manifest = Manifest::new().input(corners_manifest("sheet.png"));
        let summary = SliceEngine::default()
            .run(&manifest, &input_root, &output_root, Some(&leftover_root))
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                processed: 1,
                sprites: 2,
                skipped: Vec::new(),
            }
        );

        let load = |path: &Path| load_image_from_file(path).unwrap().into_rgba8();

        let first = load(&output_root.join("sprites/first.png"));
        let second = load(&output_root.join("sprites/second.png"));
        assert_eq!(first, imageops::crop_imm(&original, 0, 0, 32, 32).to_image());
        assert_eq!(second, imageops::crop_imm(&original, 224, 224, 32, 32).to_image());

        let claimed = [
            PixelRect {
                x: 0,
                y: 0,
                width: 32,
                height: 32,
            },
            PixelRect {
                x: 224,
                y: 224,
                width: 32,
                height: 32,
            },
        ];
        let leftover = load(&leftover_root.join("sheet.png"));
        assert_eq!(leftover.dimensions(), (256, 256));
        for (x, y, pxl) in leftover.enumerate_pixels() {
            if claimed.iter().any(|rect| rect.contains(x, y)) {
                assert_eq!(pxl, &REDACTED);
            } else {
                assert_eq!(pxl, original.get_pixel(x, y));
            }
        }

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_input_is_skipped_and_run_continues() {
        let dir = unique_temp_dir("engine-missing");
        let (input_root, output_root, leftover_root) =
            (dir.join("in"), dir.join("out"), dir.join("left"));

        fs::create_dir_all(&input_root).unwrap();
        atlas(128).save(input_root.join("present.png")).unwrap();

        let manifest = Manifest::new()
            .input(
                InputSpec::new("missing.png").output(OutputSpec::new(
                    "ghost.png",
                    Region::new(32, 32, 16, 16, 128, 128).unwrap(),
                )),
            )
            .input(corners_manifest("present.png"));

        let summary = SliceEngine::default()
            .run(&manifest, &input_root, &output_root, Some(&leftover_root))
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.sprites, 2);
        assert_eq!(summary.skipped, vec![input_root.join("missing.png")]);

        assert!(!output_root.join("ghost.png").exists());
        assert!(!leftover_root.join("missing.png").exists());
        assert!(output_root.join("sprites/first.png").is_file());
        assert!(leftover_root.join("present.png").is_file());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn each_missing_input_is_recorded_once() {
        let dir = unique_temp_dir("engine-missing-many");
        let (input_root, output_root) = (dir.join("in"), dir.join("out"));

        fs::create_dir_all(&input_root).unwrap();
        atlas(128).save(input_root.join("present.png")).unwrap();

        let manifest = Manifest::new()
            .input(corners_manifest("gone/a.png"))
            .input(corners_manifest("present.png"))
            .input(corners_manifest("gone/b.png"));

        let summary = SliceEngine::default()
            .run(&manifest, &input_root, &output_root, None)
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                processed: 1,
                sprites: 2,
                skipped: vec![input_root.join("gone/a.png"), input_root.join("gone/b.png")],
            }
        );

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_input_aborts_the_run() {
        let dir = unique_temp_dir("engine-corrupt");
        let (input_root, output_root) = (dir.join("in"), dir.join("out"));

        fs::create_dir_all(&input_root).unwrap();
        fs::write(input_root.join("broken.png"), b"nope").unwrap();
        atlas(128).save(input_root.join("present.png")).unwrap();

        let manifest = Manifest::new()
            .input(corners_manifest("broken.png"))
            .input(corners_manifest("present.png"));

        let err = SliceEngine::default().run(&manifest, &input_root, &output_root, None);

        assert!(matches!(err, Err(SliceError::Decode { path, .. }) if path.ends_with("broken.png")));
        assert!(!output_root.join("sprites/first.png").exists());

        let _ = fs::remove_dir_all(dir);
    }
}
