//! Luminance ranking and rank-matched correspondence.

pub(crate) mod correspondence;
pub(crate) mod luminance;
