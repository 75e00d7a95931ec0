use image::RgbImage;

use crate::assets::resize::canvas_of;
use crate::foundation::core::{Canvas, PixelPos, Rgb8};
use crate::foundation::error::{MorphError, MorphResult};
use crate::solve::luminance::{PixelSample, rank_by_luminance, sample_pixels};

/// Where one source pixel starts, where it ends, and the color it carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelTrack {
    /// Source coordinate.
    pub start: PixelPos,
    /// Destination coordinate.
    pub end: PixelPos,
    /// Source color, kept for the whole trip.
    pub color: Rgb8,
}

/// Rank-matched pixel correspondence between two equally sized images.
///
/// Tracks are ordered by ascending source luminance (ties by source index). This order is also
/// the compositor's paint order.
#[derive(Clone, Debug)]
pub struct Correspondence {
    canvas: Canvas,
    tracks: Vec<PixelTrack>,
}

impl Correspondence {
    /// Pair the i-th darkest source pixel with the position of the i-th darkest target pixel.
    ///
    /// Both images must already share dimensions.
    #[tracing::instrument(skip_all, fields(w = source.width(), h = source.height()))]
    pub fn solve(source: &RgbImage, target: &RgbImage) -> MorphResult<Self> {
        let canvas = canvas_of(source);
        let target_canvas = canvas_of(target);
        if canvas != target_canvas {
            return Err(MorphError::precondition(format!(
                "source and target must share dimensions: source {}x{}, target {}x{}",
                canvas.width, canvas.height, target_canvas.width, target_canvas.height
            )));
        }
        if canvas.is_empty() {
            return Err(MorphError::precondition(
                "cannot build a correspondence for an empty image",
            ));
        }

        let src = sample_pixels(source);
        let tgt = sample_pixels(target);
        let out = Self::from_samples(canvas, &src, &tgt)?;
        tracing::debug!(pixels = out.len(), "correspondence solved");
        Ok(out)
    }

    /// Rank-match two sample sets living on `canvas`.
    pub fn from_samples(
        canvas: Canvas,
        source: &[PixelSample],
        target: &[PixelSample],
    ) -> MorphResult<Self> {
        if source.len() != target.len() {
            return Err(MorphError::precondition(format!(
                "pixel count mismatch: source has {}, target has {}",
                source.len(),
                target.len()
            )));
        }
        if source.is_empty() {
            return Err(MorphError::precondition(
                "cannot build a correspondence from zero pixels",
            ));
        }
        if source.len() != canvas.pixel_count() {
            return Err(MorphError::precondition(format!(
                "sample count {} does not cover a {}x{} canvas",
                source.len(),
                canvas.width,
                canvas.height
            )));
        }

        let source_order = rank_by_luminance(source);
        let target_order = rank_by_luminance(target);

        let tracks = source_order
            .iter()
            .zip(&target_order)
            .map(|(&s, &t)| PixelTrack {
                start: source[s].position,
                end: target[t].position,
                color: source[s].color,
            })
            .collect();

        Ok(Self { canvas, tracks })
    }

    /// Build a correspondence from explicit tracks.
    ///
    /// Positions must lie on `canvas`; bijectivity is not required.
    pub fn from_tracks(canvas: Canvas, tracks: Vec<PixelTrack>) -> MorphResult<Self> {
        if canvas.is_empty() || tracks.is_empty() {
            return Err(MorphError::precondition(
                "correspondence needs a non-empty canvas and at least one track",
            ));
        }
        if let Some(bad) = tracks
            .iter()
            .find(|t| !canvas.contains(t.start) || !canvas.contains(t.end))
        {
            return Err(MorphError::precondition(format!(
                "track {:?} -> {:?} leaves the {}x{} canvas",
                bad.start, bad.end, canvas.width, canvas.height
            )));
        }
        Ok(Self { canvas, tracks })
    }

    /// Shared canvas of both images.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Tracks in paint order.
    pub fn tracks(&self) -> &[PixelTrack] {
        &self.tracks
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Return `true` when there are no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/solve/correspondence.rs"]
mod tests;
