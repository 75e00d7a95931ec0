//! Image loading and canvas preparation.

pub(crate) mod decode;
pub(crate) mod resize;
