//! pixmorph turns one image into another by moving its pixels.
//!
//! Every source pixel is matched to a target position by luminance rank. Over the animation each
//! pixel travels in a straight line to its destination, with a Gaussian wobble that vanishes at both
//! ends. The public API is session-oriented:
//!
//! - Load and prepare images ([`load_image`], [`preprocess`], [`resize_to_match`])
//! - Solve a [`Correspondence`]
//! - Create a [`MorphSession`] and stream its frames into a [`FrameSink`]
//!
//! [`MorphPipeline`] runs all of the above from two image paths.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animate;
mod assets;
mod foundation;
mod render;
mod session;
mod solve;

pub mod config;
pub mod encode;
pub mod gate;
pub mod pipeline;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, PixelPos, Rgb8};
pub use crate::foundation::error::{MorphError, MorphResult};

pub use crate::animate::timeline::Timeline;
pub use crate::animate::trajectory::{
    DEFAULT_NOISE_AMPLITUDE, Interpolator, frame_rng, to_pixel, wobble_envelope,
};
pub use crate::assets::decode::{decode_image, load_image};
pub use crate::assets::resize::{DEFAULT_TARGET_HEIGHT, canvas_of, preprocess, resize_to_match};
pub use crate::config::{DEFAULT_FRAME_COUNT, MorphConfig};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{Container, FrameSink, InMemorySink, SinkConfig};
pub use crate::gate::{AcceptAll, CommandGate, SubjectGate};
pub use crate::pipeline::{MorphOutcome, MorphPipeline};
pub use crate::render::compositor::Compositor;
pub use crate::render::frame::FrameRgb;
pub use crate::session::morph_session::{MorphSession, RenderOpts, RenderStats};
pub use crate::session::progress::{LogProgress, NoProgress, ProgressObserver};
pub use crate::solve::correspondence::{Correspondence, PixelTrack};
pub use crate::solve::luminance::{
    LUMA_WEIGHTS_RGB, PixelSample, luminance, rank_by_luminance, sample_pixels,
};
