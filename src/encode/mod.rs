//! Encoding sinks.
//!
//! Sinks consume rendered frames in frame order and are driven by `MorphSession::render`.

/// `ffmpeg`-based sinks (MP4/WebM output via system `ffmpeg`).
pub mod ffmpeg;
/// PNG image-sequence sink.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
