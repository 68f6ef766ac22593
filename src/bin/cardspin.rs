use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use cardspin::{
    AnimationMode, BacksideMode, CompositeMotion, FlipMotion, GlobeAxis, GlobeMotion,
    MagickGifSink, RenderThreading, Rgba8, RunRequest, SettingsStore, SpinMotion,
};

#[derive(Parser, Debug)]
#[command(name = "cardspin", version, about = "Spin, flip and globe animations from a still image")]
struct Cli {
    /// Log at debug level.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an animated GIF (requires ImageMagick on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Show or change persisted settings.
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Front image.
    #[arg(long)]
    front: PathBuf,

    /// Back image (ignored while backside simulation is on).
    #[arg(long)]
    back: Option<PathBuf>,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 12)]
    fps: u32,

    /// Run length in seconds.
    #[arg(long, default_value_t = 2.0)]
    duration: f64,

    /// Square canvas side in pixels (default depends on the mode).
    #[arg(long)]
    size: Option<u32>,

    /// transparent, black, white, #rrggbb or #rrggbbaa.
    #[arg(long, default_value = "transparent")]
    background: Rgba8,

    /// Trim uniform borders before composing.
    #[arg(long, default_value_t = false)]
    crop: bool,

    /// Override the persisted backside mode for this run.
    #[arg(long, value_enum)]
    backside: Option<BacksideArg>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Skip ImageMagick layer optimization.
    #[arg(long, default_value_t = false)]
    no_optimize: bool,

    #[command(subcommand)]
    mode: ModeCmd,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Normalized time in [0, 1].
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    #[command(subcommand)]
    mode: ModeCmd,
}

#[derive(Subcommand, Debug)]
enum ModeCmd {
    /// Spin about the vertical axis.
    Spin {
        /// Swing back and forth instead of a full turn.
        #[arg(long, default_value_t = false)]
        oscillating: bool,
        #[arg(long, default_value_t = 1)]
        cycles: u32,
        #[arg(long, default_value_t = 180.0)]
        max_angle: f64,
    },
    /// Yaw with a chosen number of full rotations.
    Yaw {
        #[arg(long, default_value_t = 1.0)]
        rotations: f64,
    },
    /// Flip about the horizontal axis.
    Flip {
        /// Single frame showing the back.
        #[arg(long = "static", default_value_t = false)]
        still: bool,
        #[arg(long, default_value_t = 1)]
        cycles: u32,
    },
    /// Wag in the image plane.
    Oscillate {
        #[arg(long, default_value_t = 15.0)]
        max_degrees: f64,
    },
    /// Combine in-plane spin, yaw and flip.
    Composite {
        #[arg(long, default_value_t = false)]
        z_spin: bool,
        /// In-plane speed; defaults to one turn per run. Implies --z-spin.
        #[arg(long)]
        z_deg_per_sec: Option<f64>,
        /// Yaw rotations over the run.
        #[arg(long)]
        yaw: Option<f64>,
        #[arg(long, default_value_t = false)]
        flip: bool,
        /// Show the back outright instead of animating the flip. Implies --flip.
        #[arg(long, default_value_t = false)]
        static_flip: bool,
        #[arg(long, default_value_t = 1)]
        flip_cycles: u32,
    },
    /// Wrap the image on a rotating globe.
    Globe {
        #[arg(long, default_value_t = 1.0)]
        rotations: f64,
        #[arg(long, value_enum, default_value_t = AxisArg::Horizontal)]
        axis: AxisArg,
        /// Texture zoom in percent.
        #[arg(long, default_value_t = 100.0)]
        zoom: f64,
        #[arg(long, default_value_t = false)]
        no_lighting: bool,
    },
}

#[derive(Args, Debug)]
struct SettingsArgs {
    /// Settings file (defaults to $CARDSPIN_SETTINGS or the user config dir).
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: SettingsCmd,
}

#[derive(Subcommand, Debug)]
enum SettingsCmd {
    /// Print the current settings as JSON.
    Show,
    /// Persist the backside mode.
    SetBackside {
        #[arg(value_enum)]
        mode: BacksideArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BacksideArg {
    Off,
    Simulate,
    SimulateUpsideDown,
}

impl From<BacksideArg> for BacksideMode {
    fn from(v: BacksideArg) -> Self {
        match v {
            BacksideArg::Off => Self::Off,
            BacksideArg::Simulate => Self::Simulate,
            BacksideArg::SimulateUpsideDown => Self::SimulateUpsideDown,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisArg {
    Horizontal,
    Vertical,
    Both,
}

impl From<AxisArg> for GlobeAxis {
    fn from(v: AxisArg) -> Self {
        match v {
            AxisArg::Horizontal => Self::Horizontal,
            AxisArg::Vertical => Self::Vertical,
            AxisArg::Both => Self::Both,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Settings(args) => cmd_settings(args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn to_mode(cmd: ModeCmd, duration_sec: f64) -> AnimationMode {
    match cmd {
        ModeCmd::Spin {
            oscillating,
            cycles,
            max_angle,
        } => AnimationMode::Spin(if oscillating {
            SpinMotion::Oscillating {
                cycles: cycles.max(1),
                max_angle_deg: max_angle,
            }
        } else {
            SpinMotion::FullTurn
        }),
        ModeCmd::Yaw { rotations } => AnimationMode::Yaw { rotations },
        ModeCmd::Flip { still, cycles } => AnimationMode::Flip(FlipMotion {
            animate: !still,
            cycles,
        }),
        ModeCmd::Oscillate { max_degrees } => AnimationMode::Oscillate { max_degrees },
        ModeCmd::Composite {
            z_spin,
            z_deg_per_sec,
            yaw,
            flip,
            static_flip,
            flip_cycles,
        } => {
            let z_degrees_per_sec = match z_deg_per_sec {
                Some(rate) => Some(rate),
                None if z_spin => Some(360.0 / duration_sec),
                None => None,
            };
            AnimationMode::Composite(CompositeMotion {
                z_degrees_per_sec,
                yaw_rotations: yaw,
                flip: (flip || static_flip).then_some(FlipMotion {
                    animate: !static_flip,
                    cycles: flip_cycles,
                }),
            })
        }
        ModeCmd::Globe {
            rotations,
            axis,
            zoom,
            no_lighting,
        } => AnimationMode::Globe(GlobeMotion {
            rotations,
            axis: axis.into(),
            zoom_percent: zoom,
            lighting: !no_lighting,
        }),
    }
}

fn build_request(common: CommonArgs, mode: ModeCmd) -> RunRequest {
    let backside_mode = match common.backside {
        Some(arg) => arg.into(),
        None => SettingsStore::default_location().load().backside_mode,
    };
    let mode = to_mode(mode, common.duration);
    RunRequest {
        front: common.front,
        back: common.back,
        output: common.out,
        fps: common.fps,
        duration_sec: common.duration,
        size: common.size,
        background: common.background,
        crop: common.crop,
        backside_mode,
        mode,
        threading: RenderThreading {
            parallel: common.parallel,
            threads: common.threads,
            ..RenderThreading::default()
        },
        optimize: true,
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut req = build_request(args.common, args.mode);
    req.optimize = !args.no_optimize;
    req.validate()?;

    let mut sink = MagickGifSink::discover()?;
    let report = cardspin::generate(&req, &mut sink)?;
    for w in &report.warnings {
        eprintln!("warning: {w}");
    }
    eprintln!(
        "wrote {} ({} frames)",
        report.output.display(),
        report.frame_count
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let req = build_request(args.common, args.mode);
    let run = cardspin::prepare_run(&req)?;
    for w in run.warnings() {
        eprintln!("warning: {w}");
    }
    let frame = run.render_frame_at(args.t)?;

    if let Some(parent) = req.output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    cardspin::assets::decode::save_png(&frame, &req.output)?;

    eprintln!("wrote {}", req.output.display());
    Ok(())
}

fn cmd_settings(args: SettingsArgs) -> anyhow::Result<()> {
    let store = match args.file {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::default_location(),
    };
    match args.cmd {
        SettingsCmd::Show => {
            let json = serde_json::to_string_pretty(&store.load())
                .context("serialize settings")?;
            println!("{json}");
        }
        SettingsCmd::SetBackside { mode } => {
            let settings = store.update(|s| s.backside_mode = mode.into())?;
            eprintln!(
                "backside mode set to {:?} in {}",
                settings.backside_mode,
                store.path().display()
            );
        }
    }
    Ok(())
}
