//! Run configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid configuration file.

use std::path::Path;

use crate::animate::trajectory::DEFAULT_NOISE_AMPLITUDE;
use crate::assets::resize::DEFAULT_TARGET_HEIGHT;
use crate::foundation::core::{Fps, Rgb8};
use crate::foundation::error::{MorphError, MorphResult};
use crate::session::morph_session::RenderOpts;

/// Default number of frames (5 seconds at 30 fps).
pub const DEFAULT_FRAME_COUNT: u64 = 150;

/// Options recognized by the pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorphConfig {
    /// Frames to render, both endpoints included. Must be at least 2.
    pub frame_count: u64,
    /// Standard deviation of the mid-animation wobble, in pixels.
    pub noise_amplitude: f64,
    /// Canvas color behind the moving pixels.
    pub background_color: Rgb8,
    /// Output frame rate.
    pub frame_rate: Fps,
    /// Seed for the wobble noise. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Height the source image is scaled to before solving.
    pub target_height: u32,
    /// Frame scheduling.
    pub render: RenderOpts,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            background_color: Rgb8::black(),
            frame_rate: Fps::default(),
            seed: None,
            target_height: DEFAULT_TARGET_HEIGHT,
            render: RenderOpts::default(),
        }
    }
}

impl MorphConfig {
    /// Parse a JSON configuration.
    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| MorphError::config(format!("invalid json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: &Path) -> MorphResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            MorphError::config(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> MorphResult<()> {
        if self.frame_count < 2 {
            return Err(MorphError::precondition(format!(
                "frame_count must be >= 2 (got {})",
                self.frame_count
            )));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(MorphError::config(format!(
                "noise_amplitude must be finite and >= 0 (got {})",
                self.noise_amplitude
            )));
        }
        Fps::new(self.frame_rate.num, self.frame_rate.den)?;
        if self.target_height < 2 {
            return Err(MorphError::config("target_height must be >= 2"));
        }
        if self.render.threads == Some(0) {
            return Err(MorphError::config("render.threads must be >= 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
