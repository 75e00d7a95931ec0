/// Observer of emission progress.
///
/// Called from the sequential emission stage only, once per frame handed to the sink, in frame
/// order.
pub trait ProgressObserver: Send {
    /// `emitted` frames out of `total` have reached the sink.
    fn on_frame(&mut self, emitted: u64, total: u64);
}

/// Ignores progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_frame(&mut self, _emitted: u64, _total: u64) {}
}

/// Logs progress through `tracing` every `every` frames and on the last frame.
#[derive(Clone, Copy, Debug)]
pub struct LogProgress {
    every: u64,
}

impl LogProgress {
    /// Log every `every` frames (`0` behaves like `1`).
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressObserver for LogProgress {
    fn on_frame(&mut self, emitted: u64, total: u64) {
        if emitted % self.every == 1 || self.every == 1 || emitted == total {
            tracing::info!("rendering frame {emitted}/{total}");
        }
    }
}
