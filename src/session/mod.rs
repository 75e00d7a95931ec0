//! Animation driver and progress reporting.

pub(crate) mod morph_session;
pub(crate) mod progress;
