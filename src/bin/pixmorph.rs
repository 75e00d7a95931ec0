use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pixmorph::encode::ffmpeg::ensure_parent_dir;
use pixmorph::{
    CommandGate, FfmpegSink, FfmpegSinkOpts, Fps, LogProgress, MorphConfig, MorphOutcome,
    MorphPipeline,
};

#[derive(Parser, Debug)]
#[command(name = "pixmorph", version)]
struct Cli {
    /// Log debug output (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the morph as an MP4 or WebM video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame at time `t` as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct MorphArgs {
    /// Image whose pixels are moved.
    #[arg(long)]
    source: PathBuf,

    /// Image whose layout the pixels settle into.
    #[arg(long)]
    target: PathBuf,

    /// JSON configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wobble amplitude in pixels.
    #[arg(long)]
    noise: Option<f64>,

    /// Seed for the wobble noise.
    #[arg(long)]
    seed: Option<u64>,

    /// Subject detector command line, e.g. `--detector "detect-person --min-score 0.6"`.
    /// The probe PNG path is appended as its last argument.
    #[arg(long, allow_hyphen_values = true)]
    detector: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    morph: MorphArgs,

    /// Output video path (`.mp4` or `.webm`).
    #[arg(long)]
    out: PathBuf,

    /// Number of frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    morph: MorphArgs,

    /// Animation time in `[0, 1]`.
    #[arg(long)]
    t: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.cmd {
        Command::Render(args) => cmd_render(args)?,
        Command::Frame(args) => cmd_frame(args)?,
    };
    if outcome == MorphOutcome::NoSubject {
        eprintln!("no subject detected");
        std::process::exit(2);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pixmorph=debug" } else { "pixmorph=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &MorphArgs) -> anyhow::Result<MorphConfig> {
    let mut cfg = match &args.config {
        Some(path) => MorphConfig::from_path(path)?,
        None => MorphConfig::default(),
    };
    if let Some(noise) = args.noise {
        cfg.noise_amplitude = noise;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    Ok(cfg)
}

fn build_pipeline(cfg: MorphConfig, args: &MorphArgs) -> anyhow::Result<MorphPipeline> {
    let pipeline = MorphPipeline::new(cfg)?;
    match args.detector.as_deref() {
        Some(line) => Ok(pipeline.with_gate(CommandGate::from_command_line(line)?)),
        None => {
            tracing::warn!("no subject detector configured; every source image is accepted");
            Ok(pipeline)
        }
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<MorphOutcome> {
    let mut cfg = load_config(&args.morph)?;
    if let Some(frames) = args.frames {
        cfg.frame_count = frames;
    }
    if let Some(fps) = args.fps {
        cfg.frame_rate = Fps::new(fps, 1)?;
    }
    cfg.render.parallel |= args.parallel;
    if args.threads.is_some() {
        cfg.render.threads = args.threads;
    }
    let pipeline = build_pipeline(cfg, &args.morph)?;

    let mut sink_opts = FfmpegSinkOpts::new(args.out.clone())?;
    sink_opts.overwrite = !args.no_overwrite;
    let mut sink = FfmpegSink::new(sink_opts);

    let outcome = pipeline.run(
        &args.morph.source,
        &args.morph.target,
        &mut sink,
        &mut LogProgress::default(),
    )?;
    if let MorphOutcome::Rendered(stats) = outcome {
        eprintln!(
            "wrote {} ({} frames)",
            args.out.display(),
            stats.frames_emitted
        );
    }
    Ok(outcome)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<MorphOutcome> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.t),
        "--t must be within [0, 1] (got {})",
        args.t
    );
    let cfg = load_config(&args.morph)?;
    let pipeline = build_pipeline(cfg, &args.morph)?;

    let Some(session) = pipeline.prepare(&args.morph.source, &args.morph.target)? else {
        return Ok(MorphOutcome::NoSubject);
    };
    let frame = session.render_at(args.t, 0)?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(MorphOutcome::Rendered(pixmorph::RenderStats {
        frames_total: 1,
        frames_emitted: 1,
    }))
}
