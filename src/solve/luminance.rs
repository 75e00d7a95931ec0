use image::RgbImage;
use rayon::prelude::*;

use crate::foundation::core::{PixelPos, Rgb8};

/// Channel weights applied as `0.299 R + 0.587 G + 0.114 B`.
pub const LUMA_WEIGHTS_RGB: [f64; 3] = [0.299, 0.587, 0.114];

/// One pixel of a decoded image, with its ranking key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSample {
    /// Row-major index on the canvas.
    pub index: usize,
    /// Grid coordinate.
    pub position: PixelPos,
    /// Original color.
    pub color: Rgb8,
    /// Weighted luminance of `color`.
    pub luminance: f64,
}

/// Weighted luminance of one color.
pub fn luminance(c: Rgb8) -> f64 {
    LUMA_WEIGHTS_RGB[0] * f64::from(c.r)
        + LUMA_WEIGHTS_RGB[1] * f64::from(c.g)
        + LUMA_WEIGHTS_RGB[2] * f64::from(c.b)
}

/// Flatten `img` into row-major samples.
pub fn sample_pixels(img: &RgbImage) -> Vec<PixelSample> {
    img.enumerate_pixels()
        .enumerate()
        .map(|(index, (x, y, px))| {
            let color = Rgb8::new(px[0], px[1], px[2]);
            PixelSample {
                index,
                position: PixelPos::new(x, y),
                color,
                luminance: luminance(color),
            }
        })
        .collect()
}

/// Return sample positions (indices into `samples`) ordered darkest first.
///
/// Equal luminances keep their original order, so the ranking is reproducible for a given
/// input.
pub fn rank_by_luminance(samples: &[PixelSample]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..samples.len()).collect();
    // par_sort_by is stable.
    order.par_sort_by(|&a, &b| samples[a].luminance.total_cmp(&samples[b].luminance));
    order
}

#[cfg(test)]
#[path = "../../tests/unit/solve/luminance.rs"]
mod tests;
