//! Frame buffers and rasterization.

pub(crate) mod compositor;
pub(crate) mod frame;
