use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MorphError, MorphResult};

/// Evenly spaced time samples over `[0, 1]`, both endpoints included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    frame_count: u64,
}

impl Timeline {
    /// Create a timeline of `frame_count` samples (must be at least 2).
    pub fn new(frame_count: u64) -> MorphResult<Self> {
        if frame_count < 2 {
            return Err(MorphError::precondition(format!(
                "frame_count must be >= 2 (got {frame_count})"
            )));
        }
        Ok(Self { frame_count })
    }

    /// Number of frames.
    pub fn frame_count(self) -> u64 {
        self.frame_count
    }

    /// Normalized time of frame `idx`: `idx / (frame_count - 1)`.
    pub fn t_at(self, idx: FrameIndex) -> MorphResult<f64> {
        if idx.0 >= self.frame_count {
            return Err(MorphError::precondition(format!(
                "frame {} is outside a {}-frame timeline",
                idx.0, self.frame_count
            )));
        }
        Ok(idx.0 as f64 / (self.frame_count - 1) as f64)
    }

    /// All samples in increasing order.
    pub fn samples(self) -> Vec<f64> {
        let last = (self.frame_count - 1) as f64;
        (0..self.frame_count).map(|i| i as f64 / last).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/timeline.rs"]
mod tests;
