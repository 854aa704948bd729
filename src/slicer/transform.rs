use image::{imageops, ImageBuffer, Pixel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("{transform} canvas for a {width}x{height} sprite exceeds {max}x{max}", max = u32::MAX)]
    CanvasTooLarge {
        transform: Transform,
        width: u32,
        height: u32,
    },
}

/// Post-processing applied to an extracted sprite before it is written.
///
/// Transforms only ever pad; sprite content is never resampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Transform {
    /// Center the sprite on a transparent square canvas of `max(w, h)`.
    Square,

    /// Like [`Transform::Square`] but the canvas side is rounded up to a power of two.
    SquarePow2,
}

impl Transform {
    pub fn apply<P: Pixel>(
        self,
        image: &ImageBuffer<P, Vec<P::Subpixel>>,
    ) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, TransformError> {
        let (width, height) = image.dimensions();
        Ok(pad_centered(image, self.canvas_side(width, height)?))
    }

    /// Side length of the square canvas for a `width`x`height` sprite.
    pub fn canvas_side(self, width: u32, height: u32) -> Result<u32, TransformError> {
        let side = width.max(height);

        match self {
            Self::Square => Ok(side),
            // sprites wider than 2^31 have no power of two that fits a u32
            Self::SquarePow2 => side
                .checked_next_power_of_two()
                .ok_or(TransformError::CanvasTooLarge {
                    transform: self,
                    width,
                    height,
                }),
        }
    }
}

/// Run `image` through `transforms` left to right.
pub fn apply_all<P: Pixel>(
    transforms: &[Transform],
    image: ImageBuffer<P, Vec<P::Subpixel>>,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, TransformError> {
    transforms
        .iter()
        .try_fold(image, |image, transform| transform.apply(&image))
}

fn pad_centered<P: Pixel>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    side: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let (width, height) = image.dimensions();
    let dx = (side - width) / 2;
    let dy = (side - height) / 2;

    trace!("padding {width}x{height} to {side}x{side} at ({dx}, {dy})");

    let mut canvas = ImageBuffer::new(side, side);
    imageops::replace(&mut canvas, image, i64::from(dx), i64::from(dy));
    canvas
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 200, 255]))
    }

    #[test]
    fn square_pads_wide_image_vertically() {
        let src = gradient(32, 16);
        let out = Transform::Square.apply(&src).unwrap();

        assert_eq!(out.dimensions(), (32, 32));

        for (x, y, pxl) in out.enumerate_pixels() {
            if (8..24).contains(&y) {
                assert_eq!(pxl, src.get_pixel(x, y - 8));
            } else {
                assert_eq!(pxl, &Rgba([0, 0, 0, 0]), "({x}, {y}) should be transparent");
            }
        }
    }

    #[test]
    fn square_pads_tall_image_horizontally() {
        let src = gradient(5, 10);
        let out = Transform::Square.apply(&src).unwrap();

        assert_eq!(out.dimensions(), (10, 10));
        // (10 - 5) / 2 truncates to 2
        assert_eq!(out.get_pixel(2, 0), src.get_pixel(0, 0));
        assert_eq!(out.get_pixel(6, 9), src.get_pixel(4, 9));
        assert_eq!(out.get_pixel(1, 5)[3], 0);
        assert_eq!(out.get_pixel(7, 5)[3], 0);
    }

    #[test]
    fn square_leaves_source_untouched() {
        let src = gradient(32, 16);
        let copy = src.clone();
        let _ = Transform::Square.apply(&src).unwrap();
        assert_eq!(src, copy);
    }

    #[test]
    fn square_is_identity_on_square_input() {
        let src = gradient(16, 16);
        assert_eq!(Transform::Square.apply(&src).unwrap(), src);
    }

    #[test]
    fn pow2_rounds_canvas_up() {
        let src = gradient(20, 12);
        let out = Transform::SquarePow2.apply(&src).unwrap();

        assert_eq!(out.dimensions(), (32, 32));
        assert_eq!(out.get_pixel(6, 10), src.get_pixel(0, 0));
        assert_eq!(out.get_pixel(5, 10)[3], 0);
    }

    #[test]
    fn apply_all_composes_in_order() {
        let src = gradient(20, 12);
        let out = apply_all(&[Transform::Square, Transform::SquarePow2], src.clone()).unwrap();

        // 20x12 -> 20x20 (content at y + 4) -> 32x32 (offset 6, 6)
        assert_eq!(out.dimensions(), (32, 32));
        assert_eq!(out.get_pixel(6, 10), src.get_pixel(0, 0));

        assert_eq!(apply_all(&[], src.clone()).unwrap(), src);
    }

    #[test]
    fn pow2_canvas_that_overflows_is_an_error() {
        assert_eq!(Transform::SquarePow2.canvas_side(1 << 31, 3), Ok(1 << 31));
        assert_eq!(Transform::Square.canvas_side(u32::MAX, 1), Ok(u32::MAX));
        assert_eq!(
            Transform::SquarePow2.canvas_side(7, (1 << 31) + 1),
            Err(TransformError::CanvasTooLarge {
                transform: Transform::SquarePow2,
                width: 7,
                height: (1 << 31) + 1,
            })
        );
        assert_eq!(Transform::SquarePow2.canvas_side(0, 0), Ok(1));
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Transform::SquarePow2.to_string(), "square_pow2");
        assert_eq!(
            serde_json::from_str::<Transform>("\"square\"").ok(),
            Some(Transform::Square)
        );
    }
}
