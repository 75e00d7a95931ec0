use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::Canvas;
use crate::foundation::error::{MorphError, MorphResult};

/// Default working height for source images.
pub const DEFAULT_TARGET_HEIGHT: u32 = 480;

/// Canvas of `img`.
pub fn canvas_of(img: &RgbImage) -> Canvas {
    Canvas::new(img.width(), img.height())
}

/// Scale `img` to `target_height` rows, keeping its aspect ratio.
///
/// Both output dimensions are rounded down to even values (at least 2) so every canvas this
/// produces is encodable as yuv420p.
pub fn preprocess(img: &RgbImage, target_height: u32) -> MorphResult<RgbImage> {
    if img.width() == 0 || img.height() == 0 {
        return Err(MorphError::precondition("cannot preprocess an empty image"));
    }
    if target_height < 2 {
        return Err(MorphError::precondition(
            "target height must be at least 2 pixels",
        ));
    }

    let width = u64::from(target_height) * u64::from(img.width()) / u64::from(img.height());
    let width = u32::try_from(width).unwrap_or(u32::MAX);
    let out = Canvas::new(even_at_least_2(width), even_at_least_2(target_height));

    tracing::debug!(
        from_w = img.width(),
        from_h = img.height(),
        to_w = out.width,
        to_h = out.height,
        "preprocess source image"
    );
    Ok(resize_exact(img, out))
}

/// Resize `img` to exactly `canvas`, ignoring aspect ratio.
///
/// This establishes the equal-dimensions precondition of the correspondence solver.
pub fn resize_to_match(img: &RgbImage, canvas: Canvas) -> MorphResult<RgbImage> {
    if canvas.is_empty() {
        return Err(MorphError::precondition("cannot resize to an empty canvas"));
    }
    if img.width() == 0 || img.height() == 0 {
        return Err(MorphError::precondition("cannot resize an empty image"));
    }
    Ok(resize_exact(img, canvas))
}

fn resize_exact(img: &RgbImage, canvas: Canvas) -> RgbImage {
    if canvas_of(img) == canvas {
        return img.clone();
    }
    imageops::resize(img, canvas.width, canvas.height, FilterType::Triangle)
}

fn even_at_least_2(v: u32) -> u32 {
    (v & !1).max(2)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resize.rs"]
mod tests;
