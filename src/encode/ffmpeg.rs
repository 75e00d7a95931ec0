use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{Container, FrameSink, SinkConfig, check_frame};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::frame::FrameRgb;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Final output path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Container and codec selection.
    pub container: Container,
}

impl FfmpegSinkOpts {
    /// Options for `out_path`, with the container inferred from its extension.
    pub fn new(out_path: impl Into<PathBuf>) -> MorphResult<Self> {
        let out_path = out_path.into();
        let container = Container::from_path(&out_path)?;
        Ok(Self {
            out_path,
            overwrite: true,
            container,
        })
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGB frames to its stdin.
///
/// ffmpeg writes to a hidden sibling of `out_path`; the file is moved into place only after
/// ffmpeg exits successfully, and removed otherwise.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    partial_path: Option<PathBuf>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            partial_path: None,
            cfg: None,
            last_idx: None,
        }
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        if let Some(path) = self.partial_path.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(MorphError::sink("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(MorphError::sink(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(MorphError::sink(
                "ffmpeg sink width/height must be even (required for yuv420p output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(MorphError::sink(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(MorphError::sink(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }

        let partial = partial_path_for(&self.opts.out_path);
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-an"]);
        cmd.args(codec_args(self.opts.container));
        cmd.arg(&partial);

        tracing::debug!(
            out = %self.opts.out_path.display(),
            container = ?self.opts.container,
            width = cfg.width,
            height = cfg.height,
            "spawning ffmpeg"
        );

        let mut child = cmd.spawn().map_err(|e| {
            MorphError::sink(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| MorphError::sink("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| MorphError::sink("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.partial_path = Some(partial);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> MorphResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| MorphError::sink("ffmpeg sink not started"))?;
        check_frame(cfg, self.last_idx, idx, frame)?;
        self.last_idx = Some(idx);

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(MorphError::sink("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            MorphError::sink(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> MorphResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| MorphError::sink("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| MorphError::sink(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| MorphError::sink("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| MorphError::sink(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(MorphError::sink(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        let partial = self
            .partial_path
            .take()
            .ok_or_else(|| MorphError::sink("ffmpeg sink lost its partial output path"))?;
        if let Err(e) = std::fs::rename(&partial, &self.opts.out_path) {
            let _ = std::fs::remove_file(&partial);
            return Err(MorphError::sink(format!(
                "failed to move '{}' into place at '{}': {e}",
                partial.display(),
                self.opts.out_path.display()
            )));
        }

        tracing::info!(out = %self.opts.out_path.display(), "video written");
        self.cfg = None;
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // Only non-empty when the run did not reach a successful `end`.
        self.abort();
    }
}

fn codec_args(container: Container) -> &'static [&'static str] {
    match container {
        Container::Mp4 => &[
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
            "-f",
            "mp4",
        ],
        Container::Webm => &[
            "-c:v",
            "libvpx-vp9",
            "-pix_fmt",
            "yuv420p",
            "-b:v",
            "0",
            "-crf",
            "32",
            "-f",
            "webm",
        ],
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` goes before `-i`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Hidden sibling of `out` that ffmpeg writes to until the run succeeds.
pub(crate) fn partial_path_for(out: &Path) -> PathBuf {
    let name = out
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());
    out.with_file_name(format!(".{name}.{}.partial", std::process::id()))
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> MorphResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
