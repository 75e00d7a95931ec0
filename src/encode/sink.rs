use std::path::Path;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::frame::FrameRgb;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in order.
///
/// Ordering contract: `push_frame` is called with strictly increasing `FrameIndex` values,
/// starting at 0.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> MorphResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> MorphResult<()>;
}

/// Video container written by the ffmpeg sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// H.264 in MP4.
    Mp4,
    /// VP9 in WebM.
    Webm,
}

impl Container {
    /// Pick a container from the extension of `path`.
    pub fn from_path(path: &Path) -> MorphResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("mp4") | Some("m4v") => Ok(Self::Mp4),
            Some("webm") => Ok(Self::Webm),
            _ => Err(MorphError::sink(format!(
                "cannot infer a video container from '{}' (expected .mp4 or .webm)",
                path.display()
            ))),
        }
    }
}

/// Reject out-of-order indices and frames that do not match the configured size.
pub(crate) fn check_frame(
    cfg: &SinkConfig,
    last: Option<FrameIndex>,
    idx: FrameIndex,
    frame: &FrameRgb,
) -> MorphResult<()> {
    if let Some(last) = last
        && idx.0 <= last.0
    {
        return Err(MorphError::sink(format!(
            "frame {} arrived after frame {}",
            idx.0, last.0
        )));
    }
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(MorphError::sink(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 3 {
        return Err(MorphError::sink(
            "frame.data size mismatch with width*height*3",
        ));
    }
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    ended: bool,
    frames: Vec<(FrameIndex, FrameRgb)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRgb)] {
        &self.frames
    }

    /// Return `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()> {
        self.cfg = Some(cfg);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> MorphResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| MorphError::sink("in-memory sink not started"))?;
        check_frame(cfg, self.frames.last().map(|(i, _)| *i), idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> MorphResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
