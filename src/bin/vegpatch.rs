use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use vegpatch::{
    CpuBackend, CpuBackendOpts, EventScript, FileTotalsSource, FrameLoop, FrameLoopOpts, Pathway,
    PatchConfig, PledgeForm, PngSequenceSink, RenderBackend, SyncLayer, TotalsSource, VegPatch,
};

const MAX_SETTLE_FRAMES: u64 = 10_000;
const LOADING_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "vegpatch", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Settle the patch at a total and write one PNG.
    Frame(FrameArgs),
    /// Replay scripted widget messages and write a PNG sequence.
    Replay(ReplayArgs),
    /// Print the client-side token estimate for a pathway.
    Tokens(TokensArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Patch config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Token total to draw.
    #[arg(long)]
    total: u64,

    /// Goal; the config's goal when absent.
    #[arg(long)]
    goal: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Patch config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-lines event script.
    #[arg(long)]
    events: PathBuf,

    /// Output directory for frame PNGs.
    #[arg(long)]
    out_dir: PathBuf,

    /// Stop after this many frames.
    #[arg(long, default_value_t = 600)]
    max_frames: u64,

    /// Totaliser document `{ "total_tokens": .., "goal": .. }` to poll.
    #[arg(long)]
    totals: Option<PathBuf>,

    /// Poll the totaliser every N frames.
    #[arg(long, default_value_t = 60)]
    poll_every: u64,
}

#[derive(Parser, Debug)]
struct TokensArgs {
    /// individual, family, school, organisation, community or other.
    #[arg(long)]
    pathway: String,

    /// Participants, class size, organisation size or group size.
    #[arg(long)]
    size: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Replay(args) => cmd_replay(args),
        Command::Tokens(args) => cmd_tokens(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PatchConfig> {
    let cfg = match path {
        Some(p) => PatchConfig::from_path(p)?,
        None => PatchConfig::default(),
    };
    let cfg = cfg.with_env_overrides();
    cfg.validate()?;
    Ok(cfg)
}

fn build_engine(cfg: &PatchConfig) -> anyhow::Result<VegPatch> {
    let mut patch = VegPatch::new(cfg)?;
    patch.init();
    Ok(patch)
}

fn build_backend(cfg: &PatchConfig) -> anyhow::Result<CpuBackend> {
    let font = cfg.caption_font().context("load caption font")?;
    Ok(CpuBackend::new(CpuBackendOpts::default().with_font(font)))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    cfg.initial_total = args.total;
    if let Some(goal) = args.goal {
        cfg.goal = goal;
    }

    let mut patch = build_engine(&cfg)?;
    let mut frames = 0;
    while !patch.is_settled() && frames < MAX_SETTLE_FRAMES {
        patch.tick();
        frames += 1;
        if patch.sprites().is_loading() {
            std::thread::sleep(LOADING_FRAME_INTERVAL);
        }
    }
    tracing::debug!(frames, sprites = patch.sprites().loaded(), "patch settled");
    let scene = patch.compose();

    let mut backend = build_backend(&cfg)?;
    let frame = backend.render_scene(&scene, patch.sprites())?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame.save_png(&args.out)?;

    eprintln!("wrote {} ({})", args.out.display(), scene.progress_text);
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut patch = build_engine(&cfg)?;
    let mut sync = SyncLayer::new(cfg.initial_total);
    let mut script = EventScript::from_path(&args.events)?;
    let mut totals = args.totals.map(FileTotalsSource::new);
    let mut backend = build_backend(&cfg)?;
    let mut sink = PngSequenceSink::new(&args.out_dir)?;

    let opts = FrameLoopOpts {
        max_frames: args.max_frames,
        poll_every: args.poll_every,
        stop_when_settled: totals.is_none(),
        loading_frame_interval: LOADING_FRAME_INTERVAL,
    };
    let report = FrameLoop::new(opts).run(
        &mut patch,
        &mut sync,
        &mut script,
        totals.as_mut().map(|t| t as &mut dyn TotalsSource),
        &mut backend,
        &mut sink,
    )?;

    for reply in &report.replies {
        println!("{}", reply.to_json()?);
    }
    let state = patch.state();
    eprintln!(
        "wrote {} frames to {} (total {} / {}, {} submissions)",
        report.painted,
        args.out_dir.display(),
        state.total,
        state.goal,
        state.submissions
    );
    Ok(())
}

fn cmd_tokens(args: TokensArgs) -> anyhow::Result<()> {
    let pathway = Pathway::parse(&args.pathway)?;
    let mut form = PledgeForm::new("", "", "", pathway);
    match pathway {
        Pathway::Family => form.participants_count = args.size,
        Pathway::School => form.class_size = args.size,
        Pathway::Organisation => form.org_size = args.size,
        Pathway::Community => form.group_size = args.size,
        Pathway::Individual | Pathway::Other => {}
    }
    println!("{}", form.estimate_tokens());
    Ok(())
}
