use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use scrollfx::{Millis, Mutation, Rng64, Scene, Stage, ViewBinding, Viewport};
use scrollfx_std::LandingVariant;

#[derive(Parser, Debug)]
#[command(name = "scrollfx", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a scene JSON file.
    Validate(ValidateArgs),
    /// Scroll a headless page through a scene and dump the mutation journal.
    Simulate(SimulateArgs),
    /// Write a built-in landing-page scene.
    Preset(PresetArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1630.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Final scroll position.
    #[arg(long)]
    to: f64,

    /// Scroll distance per frame.
    #[arg(long, default_value_t = 50.0)]
    step: f64,

    /// Time to keep running after the last scroll, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    settle_ms: u64,

    /// Seed for randomized behaviour.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Variant {
    Plain,
    Explosion,
}

impl From<Variant> for LandingVariant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Plain => Self::Plain,
            Variant::Explosion => Self::Explosion,
        }
    }
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Landing-page variant.
    #[arg(long, value_enum, default_value_t = Variant::Plain)]
    variant: Variant,

    /// Output scene JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Serialize)]
struct Trace<'a> {
    viewport: Viewport,
    scroll_y: f64,
    duration: Millis,
    mutations: &'a [Mutation],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn load(path: &Path) -> anyhow::Result<Scene> {
    let scene =
        Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", path.display()))?;
    Ok(scene)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = load(&args.in_path)?;
    eprintln!(
        "ok: {} ({} elements)",
        args.in_path.display(),
        scene.element_names().count()
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "--step must be a positive number"
    );
    anyhow::ensure!(args.to.is_finite(), "--to must be finite");
    let scene = load(&args.in_path)?;
    let viewport = Viewport::new(args.width, args.height)?;

    let mut stage = Stage::new(viewport);
    scene.populate(stage.document_mut());
    let binding = ViewBinding::mount(&mut stage, &scene, Rng64::new(args.seed))?;

    let target = args.to.max(0.0);
    let mut y = 0.0;
    while y < target {
        y = (y + args.step).min(target);
        stage.scroll_to(y);
        stage.advance(Stage::DEFAULT_FRAME);
    }
    stage.advance(Millis(args.settle_ms));
    tracing::debug!(
        pending_reveals = binding.pending_reveals(),
        now = stage.now().0,
        "simulation finished"
    );

    let trace = Trace {
        viewport,
        scroll_y: stage.scroll_y(),
        duration: stage.now(),
        mutations: stage.document().journal(),
    };
    let json = serde_json::to_vec_pretty(&trace).context("serialize trace")?;
    match &args.out {
        Some(path) => {
            write_file(path, &json)?;
            eprintln!(
                "wrote {} ({} mutations)",
                path.display(),
                trace.mutations.len()
            );
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(&json).context("write stdout")?;
            out.write_all(b"\n").context("write stdout")?;
        }
    }
    binding.dispose(&mut stage);
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let variant = LandingVariant::from(args.variant);
    let scene = scrollfx_std::landing_page(variant)?;
    scene.validate()?;
    let json = serde_json::to_vec_pretty(&scene.to_value()?).context("serialize preset")?;
    write_file(&args.out, &json)?;
    eprintln!("wrote {} ({})", args.out.display(), variant.name());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
