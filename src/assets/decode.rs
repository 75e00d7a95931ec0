use std::path::Path;

use image::RgbImage;

use crate::foundation::error::{MorphError, MorphResult};

/// Decode encoded image bytes into opaque RGB8.
///
/// Alpha, if present, is dropped.
pub fn decode_image(bytes: &[u8]) -> MorphResult<RgbImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MorphError::decode(format!("decode image from memory: {e}")))?;
    non_empty(dyn_img.to_rgb8())
}

/// Read and decode the image at `path`.
pub fn load_image(path: &Path) -> MorphResult<RgbImage> {
    use anyhow::Context as _;
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        MorphError::Decode(msg) => MorphError::decode(format!("'{}': {msg}", path.display())),
        other => other,
    })
}

fn non_empty(img: RgbImage) -> MorphResult<RgbImage> {
    if img.width() == 0 || img.height() == 0 {
        return Err(MorphError::precondition("image has no pixels"));
    }
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
