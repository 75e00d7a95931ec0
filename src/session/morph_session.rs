use std::collections::HashMap;
use std::sync::{Arc, mpsc};

use rayon::prelude::*;

use crate::animate::timeline::Timeline;
use crate::animate::trajectory::{Interpolator, frame_rng};
use crate::config::MorphConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, PixelPos};
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::compositor::Compositor;
use crate::render::frame::FrameRgb;
use crate::session::progress::ProgressObserver;
use crate::solve::correspondence::Correspondence;

const MAX_REORDER_BUFFER_BYTES: u64 = 128 * 1024 * 1024;

/// Options controlling how frames are scheduled.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOpts {
    /// Compute frames on a dedicated rayon thread pool.
    pub parallel: bool,
    /// Frames computed per chunk before the producer moves on.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Bounded channel capacity between frame workers and the emission thread.
    pub channel_capacity: usize,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            channel_capacity: 4,
        }
    }
}

/// Render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames in the animation.
    pub frames_total: u64,
    /// Frames accepted by the sink.
    pub frames_emitted: u64,
}

/// Animation driver over one solved correspondence.
///
/// Each frame depends only on the shared correspondence, its own time sample and a random
/// source derived from `(seed, frame index)`, so frames can be computed in any order and on any
/// worker. Delivery to the sink is always in frame order.
pub struct MorphSession {
    corr: Arc<Correspondence>,
    timeline: Timeline,
    interp: Interpolator,
    compositor: Compositor,
    fps: Fps,
    seed: u64,
    opts: RenderOpts,
}

impl MorphSession {
    /// Build a session from a configuration.
    pub fn new(corr: Arc<Correspondence>, cfg: &MorphConfig) -> MorphResult<Self> {
        let timeline = Timeline::new(cfg.frame_count)?;
        let interp = Interpolator::new(cfg.noise_amplitude)?;
        let fps = Fps::new(cfg.frame_rate.num, cfg.frame_rate.den)?;
        let compositor = Compositor::new(corr.canvas(), cfg.background_color);
        let seed = cfg.seed.unwrap_or_else(rand::random::<u64>);
        tracing::debug!(seed, frames = cfg.frame_count, "morph session created");
        Ok(Self {
            corr,
            timeline,
            interp,
            compositor,
            fps,
            seed,
            opts: cfg.render.clone(),
        })
    }

    /// Seed actually used for the wobble noise.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Time samples of this session.
    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    /// Shared correspondence.
    pub fn correspondence(&self) -> &Arc<Correspondence> {
        &self.corr
    }

    /// Compute one frame.
    pub fn render_frame(&self, idx: FrameIndex) -> MorphResult<FrameRgb> {
        let mut positions = Vec::with_capacity(self.corr.len());
        self.render_frame_into(idx, &mut positions)
    }

    /// Compute the frame at an arbitrary time `t` in `[0, 1]`, with noise stream `stream`.
    pub fn render_at(&self, t: f64, stream: u64) -> MorphResult<FrameRgb> {
        let mut rng = frame_rng(self.seed, FrameIndex(stream));
        let positions = self.interp.positions(&self.corr, t, &mut rng);
        self.compositor.composite_tracks(&self.corr, &positions)
    }

    fn render_frame_into(
        &self,
        idx: FrameIndex,
        positions: &mut Vec<PixelPos>,
    ) -> MorphResult<FrameRgb> {
        let t = self.timeline.t_at(idx)?;
        let mut rng = frame_rng(self.seed, idx);
        self.interp
            .positions_into(&self.corr, t, &mut rng, positions);
        self.compositor.composite_tracks(&self.corr, positions)
    }

    /// Render every frame and stream it into `sink` in frame order.
    ///
    /// The first sink error stops the run; the sink's `end` is only called after every frame was
    /// accepted.
    #[tracing::instrument(skip_all, fields(frames = self.timeline.frame_count(), parallel = self.opts.parallel))]
    pub fn render(
        &self,
        sink: &mut dyn FrameSink,
        progress: &mut dyn ProgressObserver,
    ) -> MorphResult<RenderStats> {
        let canvas = self.corr.canvas();
        let cfg = SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        };
        let total = self.timeline.frame_count();

        let cap = self.opts.channel_capacity.max(1);
        let bytes_per_frame = (canvas.pixel_count() as u64).saturating_mul(3).max(1);
        let max_chunk_by_mem = (MAX_REORDER_BUFFER_BYTES / bytes_per_frame).max(1);
        let chunk_size = normalized_chunk_size(self.opts.chunk_size)
            .min(max_chunk_by_mem)
            .min(total);

        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };

        std::thread::scope(|scope| -> MorphResult<RenderStats> {
            let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);

            // Emission thread: the only writer to the sink.
            let enc = scope.spawn(move || -> MorphResult<Emitted> {
                sink.begin(cfg)?;

                let mut next = 0u64;
                let mut pending = HashMap::<u64, FrameRgb>::new();
                while next < total {
                    let frame = match pending.remove(&next) {
                        Some(frame) => frame,
                        None => {
                            let Ok(msg) = rx.recv() else {
                                // Producers hung up early; they report why.
                                return Ok(Emitted::Abandoned);
                            };
                            pending.insert(msg.idx.0, msg.frame);
                            continue;
                        }
                    };
                    sink.push_frame(FrameIndex(next), &frame)?;
                    next += 1;
                    progress.on_frame(next, total);
                }

                sink.end()?;
                Ok(Emitted::All(next))
            });

            let produce_res = match pool.as_ref() {
                Some(pool) => self.produce_parallel(pool, &tx, total, chunk_size),
                None => self.produce_sequential(&tx, total),
            };
            drop(tx);

            let enc_res = enc
                .join()
                .map_err(|_| MorphError::sink("emission thread panicked"))?;

            match enc_res {
                Err(e) => Err(e),
                Ok(Emitted::Abandoned) => Err(produce_res.err().unwrap_or_else(|| {
                    MorphError::sink("frame producers stopped before the last frame")
                })),
                Ok(Emitted::All(emitted)) => {
                    produce_res?;
                    tracing::debug!(emitted, "render finished");
                    Ok(RenderStats {
                        frames_total: total,
                        frames_emitted: emitted,
                    })
                }
            }
        })
    }

    fn produce_sequential(&self, tx: &mpsc::SyncSender<FrameMsg>, total: u64) -> MorphResult<()> {
        let mut positions = Vec::with_capacity(self.corr.len());
        for f in 0..total {
            let idx = FrameIndex(f);
            let frame = self.render_frame_into(idx, &mut positions)?;
            send(tx, idx, frame)?;
        }
        Ok(())
    }

    fn produce_parallel(
        &self,
        pool: &rayon::ThreadPool,
        tx: &mpsc::SyncSender<FrameMsg>,
        total: u64,
        chunk_size: u64,
    ) -> MorphResult<()> {
        let mut chunk_start = 0u64;
        while chunk_start < total {
            let chunk_end = (chunk_start + chunk_size).min(total);
            pool.install(|| {
                (chunk_start..chunk_end).into_par_iter().try_for_each_init(
                    || (tx.clone(), Vec::with_capacity(self.corr.len())),
                    |(tx, positions), f| -> MorphResult<()> {
                        let idx = FrameIndex(f);
                        let frame = self.render_frame_into(idx, positions)?;
                        send(tx, idx, frame)
                    },
                )
            })?;
            chunk_start = chunk_end;
        }
        Ok(())
    }
}

enum Emitted {
    All(u64),
    Abandoned,
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: FrameRgb,
}

fn send(tx: &mpsc::SyncSender<FrameMsg>, idx: FrameIndex, frame: FrameRgb) -> MorphResult<()> {
    tx.send(FrameMsg { idx, frame })
        .map_err(|_| MorphError::sink("emission thread is not accepting frames"))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> MorphResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MorphError::config(
            "render 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MorphError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/morph_session.rs"]
mod tests;
