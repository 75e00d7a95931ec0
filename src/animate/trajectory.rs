use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

use crate::foundation::core::{Canvas, FrameIndex, PixelPos};
use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::{clamp_axis, mix_seed, truncate_axis};
use crate::solve::correspondence::{Correspondence, PixelTrack};

/// Default standard deviation of the per-pixel wobble, in pixels.
pub const DEFAULT_NOISE_AMPLITUDE: f64 = 5.0;

/// `sin(t * pi)`, forced to exactly zero at and beyond both ends of the timeline.
pub fn wobble_envelope(t: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 || t.is_nan() {
        return 0.0;
    }
    (t * std::f64::consts::PI).sin()
}

/// Independent random source for frame `idx` of a run seeded with `seed`.
pub fn frame_rng(seed: u64, idx: FrameIndex) -> StdRng {
    StdRng::seed_from_u64(mix_seed(seed, idx.0))
}

/// Moves every tracked pixel along `start -> end` with an enveloped gaussian wobble.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpolator {
    amplitude: f64,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self {
            amplitude: DEFAULT_NOISE_AMPLITUDE,
        }
    }
}

impl Interpolator {
    /// Create an interpolator whose wobble has standard deviation `amplitude`.
    pub fn new(amplitude: f64) -> MorphResult<Self> {
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(MorphError::precondition(format!(
                "noise amplitude must be finite and >= 0 (got {amplitude})"
            )));
        }
        Ok(Self { amplitude })
    }

    /// Wobble standard deviation.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Unclamped floating-point position of `track` at time `t` with a wobble sample
    /// `(nx, ny)` drawn from a standard normal.
    pub fn position_f64(&self, track: &PixelTrack, t: f64, noise: (f64, f64)) -> (f64, f64) {
        let w = wobble_envelope(t) * self.amplitude;
        let lerp = |a: u32, b: u32| f64::from(a) * (1.0 - t) + f64::from(b) * t;
        (
            lerp(track.start.x, track.end.x) + w * noise.0,
            lerp(track.start.y, track.end.y) + w * noise.1,
        )
    }

    /// Integer positions of every track at time `t`, written into `out` in track order.
    ///
    /// `t` is clamped into `[0, 1]`. Two standard-normal draws (x then y) are taken from `rng` per
    /// track, unless the wobble vanishes for this frame, in which case `rng` is untouched.
    pub fn positions_into<R: rand::Rng + ?Sized>(
        &self,
        corr: &Correspondence,
        t: f64,
        rng: &mut R,
        out: &mut Vec<PixelPos>,
    ) {
        let t = clamp_axis(t, 1.0);
        let canvas = corr.canvas();
        let still = wobble_envelope(t) == 0.0 || self.amplitude == 0.0;

        out.clear();
        out.reserve(corr.len());
        for track in corr.tracks() {
            let noise = if still {
                (0.0, 0.0)
            } else {
                (StandardNormal.sample(rng), StandardNormal.sample(rng))
            };
            out.push(to_pixel(canvas, self.position_f64(track, t, noise)));
        }
    }

    /// Allocating form of [`Interpolator::positions_into`].
    pub fn positions<R: rand::Rng + ?Sized>(
        &self,
        corr: &Correspondence,
        t: f64,
        rng: &mut R,
    ) -> Vec<PixelPos> {
        let mut out = Vec::with_capacity(corr.len());
        self.positions_into(corr, t, rng, &mut out);
        out
    }
}

/// Clamp each axis onto `canvas`, then truncate.
pub fn to_pixel(canvas: Canvas, (x, y): (f64, f64)) -> PixelPos {
    let max_x = f64::from(canvas.width.saturating_sub(1));
    let max_y = f64::from(canvas.height.saturating_sub(1));
    PixelPos::new(
        truncate_axis(clamp_axis(x, max_x)),
        truncate_axis(clamp_axis(y, max_y)),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/animate/trajectory.rs"]
mod tests;
