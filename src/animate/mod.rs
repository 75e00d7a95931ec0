//! Time sampling and per-frame pixel trajectories.

pub(crate) mod timeline;
pub(crate) mod trajectory;
