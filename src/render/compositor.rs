use crate::foundation::core::{Canvas, PixelPos, Rgb8};
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::frame::FrameRgb;
use crate::solve::correspondence::Correspondence;

/// Rasterizes moved pixels onto a fresh background canvas.
///
/// Pixels are painted in slice order with no blending: when several land on the same
/// coordinate, the last one painted wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compositor {
    canvas: Canvas,
    background: Rgb8,
}

impl Compositor {
    /// Create a compositor for `canvas` with the given background.
    pub fn new(canvas: Canvas, background: Rgb8) -> Self {
        Self { canvas, background }
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Paint `colors[i]` at `positions[i]` for every `i`.
    pub fn composite(&self, positions: &[PixelPos], colors: &[Rgb8]) -> MorphResult<FrameRgb> {
        if positions.len() != colors.len() {
            return Err(MorphError::precondition(format!(
                "compositor got {} positions but {} colors",
                positions.len(),
                colors.len()
            )));
        }
        let mut frame = FrameRgb::filled(self.canvas, self.background);
        for (&pos, &c) in positions.iter().zip(colors) {
            frame.put(pos, c);
        }
        Ok(frame)
    }

    /// Paint every track of `corr` at `positions`, in track order.
    pub fn composite_tracks(
        &self,
        corr: &Correspondence,
        positions: &[PixelPos],
    ) -> MorphResult<FrameRgb> {
        if positions.len() != corr.len() {
            return Err(MorphError::precondition(format!(
                "compositor got {} positions for {} tracks",
                positions.len(),
                corr.len()
            )));
        }
        let mut frame = FrameRgb::filled(self.canvas, self.background);
        for (&pos, track) in positions.iter().zip(corr.tracks()) {
            frame.put(pos, track.color);
        }
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
