mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use revela_core::{Duration, ReferenceCorner, RevelaConfig, ViewportProfile};
use revela_svg::ResponsiveVariant;
use revela_web::{RevealOutcome, RevealSession, ViewportHint};

const DEFAULT_CONFIG_FILE: &str = "revela.toml";

#[derive(Parser)]
#[command(
    name = "revela",
    version,
    about = "Revela — staggered line-drawing reveals for SVG illustrations",
    long_about = "Revela orders the shapes of an SVG by their distance from a corner of the viewport\nand schedules a draw-in, fill and stroke fade for each of them.\n\nEmit the schedule as JSON, bake it into a self-animating SVG, or sample it."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reveal schedule as JSON
    Schedule {
        #[command(flatten)]
        reveal: RevealArgs,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a copy of the SVG that plays the reveal through CSS animations
    Animate {
        #[command(flatten)]
        reveal: RevealArgs,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Add a media query switching narrow viewports to the constrained timing
        #[arg(long)]
        responsive: bool,
    },

    /// Show the reveal order as a tree
    Inspect {
        #[command(flatten)]
        reveal: RevealArgs,
    },

    /// Evaluate every animated property at a point in time
    Sample {
        #[command(flatten)]
        reveal: RevealArgs,

        /// Time in seconds from the start of the reveal
        #[arg(long, default_value_t = 0.0)]
        at: f64,
    },

    /// Load a source and validate the schedule built from it
    Check {
        #[command(flatten)]
        reveal: RevealArgs,
    },

    /// Write the default configuration to revela.toml
    Init {
        /// Target path
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version and defaults
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    /// Detect from --viewport-width and --user-agent
    Auto,
    Default,
    Constrained,
}

#[derive(Args, Debug)]
struct RevealArgs {
    /// Path or http(s) URL of the SVG
    #[arg()]
    source: String,

    /// Configuration file (default: ./revela.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Timing profile
    #[arg(long, value_enum, default_value_t = ProfileArg::Auto)]
    profile: ProfileArg,

    /// Viewport width in CSS pixels, for profile detection
    #[arg(long)]
    viewport_width: Option<f64>,

    /// User agent string, for profile detection
    #[arg(long)]
    user_agent: Option<String>,

    /// Reference corner: bottom-right, bottom-left, top-right, top-left
    #[arg(long)]
    corner: Option<ReferenceCorner>,
}

impl RevealArgs {
    fn load_config(&self) -> Result<RevelaConfig> {
        let mut config = match &self.config {
            Some(path) => RevelaConfig::load_from_file(path)
                .with_context(|| format!("failed to load config: {}", path.display()))?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    RevelaConfig::load_from_file(default_path)
                        .with_context(|| format!("failed to load config: {}", DEFAULT_CONFIG_FILE))?
                } else {
                    RevelaConfig::default()
                }
            }
        };
        if let Some(corner) = self.corner {
            config.reveal.corner = corner;
        }
        Ok(config)
    }

    fn session(&self) -> Result<RevealSession> {
        let config = self.load_config()?;
        let source = revela_web::source_for(&self.source, &config.loader)
            .with_context(|| format!("failed to open source: {}", self.source))?;
        Ok(RevealSession::new(config, source).with_viewport(ViewportHint::new(
            self.viewport_width,
            self.user_agent.clone(),
        )))
    }

    fn profile(&self, session: &RevealSession) -> ViewportProfile {
        match self.profile {
            ProfileArg::Auto => session.detect_profile(),
            ProfileArg::Default => ViewportProfile::Default,
            ProfileArg::Constrained => ViewportProfile::Constrained,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries JSON and SVG output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Schedule { reveal, output } => run_async(cmd_schedule(reveal, output)),
        Commands::Animate {
            reveal,
            output,
            responsive,
        } => run_async(cmd_animate(reveal, output, responsive)),
        Commands::Inspect { reveal } => run_async(cmd_inspect(reveal)),
        Commands::Sample { reveal, at } => run_async(cmd_sample(reveal, at)),
        Commands::Check { reveal } => run_async(cmd_check(reveal)),
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Info => cmd_info(),
    }
}

fn run_async<F>(future: F) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;
    runtime.block_on(future)
}

/// Run the session; the session has already logged the cause on failure.
async fn run_session(session: &RevealSession, profile: ViewportProfile) -> Result<RevealOutcome> {
    session
        .run(profile)
        .await
        .with_context(|| format!("no schedule produced for {}", session.source_name()))
}

fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(path, contents)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = contents.len(), "wrote output");
        }
        None => println!("{}", contents),
    }
    Ok(())
}

async fn cmd_schedule(args: RevealArgs, output: Option<PathBuf>) -> Result<()> {
    let session = args.session()?;
    let outcome = run_session(&session, args.profile(&session)).await?;
    let json = outcome
        .schedule
        .to_json()
        .context("failed to serialize schedule")?;
    write_output(output.as_deref(), &json)
}

async fn cmd_animate(args: RevealArgs, output: Option<PathBuf>, responsive: bool) -> Result<()> {
    let session = args.session()?;
    let profile = if responsive {
        ViewportProfile::Default
    } else {
        args.profile(&session)
    };
    let outcome = run_session(&session, profile).await?;

    let constrained = if responsive {
        Some(revela_ir::RevealSchedule::build(
            &outcome.scene,
            session.config(),
            ViewportProfile::Constrained,
        ))
    } else {
        None
    };
    let variant = constrained.as_ref().map(|schedule| ResponsiveVariant {
        max_width: session.config().reveal.constrained_max_width,
        schedule,
    });

    let svg = revela_svg::render_animated_svg(&outcome.document, &outcome.schedule, variant)
        .context("failed to render animated SVG")?;
    write_output(output.as_deref(), &svg)
}

async fn cmd_inspect(args: RevealArgs) -> Result<()> {
    let session = args.session()?;
    let outcome = run_session(&session, args.profile(&session)).await?;
    print!(
        "{}",
        report::inspect_tree(&args.source, &outcome.scene, &outcome.schedule)
    );
    Ok(())
}

async fn cmd_sample(args: RevealArgs, at: f64) -> Result<()> {
    if !at.is_finite() || at < 0.0 {
        anyhow::bail!("--at must be a non-negative number of seconds, got {}", at);
    }
    let session = args.session()?;
    let outcome = run_session(&session, args.profile(&session)).await?;
    let time = Duration::from_seconds(at);
    print!(
        "{}",
        report::sample_table(time, &outcome.schedule.sample(time))
    );
    Ok(())
}

async fn cmd_check(args: RevealArgs) -> Result<()> {
    let session = args.session()?;
    println!("🔍 Checking {}", args.source);

    let outcome = run_session(&session, args.profile(&session)).await?;
    println!("   ✓ Load OK ({} shapes)", outcome.scene.len());

    revela_ir::validate_schedule(&outcome.schedule).map_err(|errors| {
        let msgs: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
        anyhow::anyhow!("Validation errors:\n  {}", msgs.join("\n  "))
    })?;
    println!("   ✓ Validate OK");

    println!();
    println!(
        "   ✅ Reveal settles after {} ({} profile).",
        outcome.schedule.total_duration(),
        outcome.schedule.profile
    );
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists (pass --force to overwrite)",
            path.display()
        );
    }
    RevelaConfig::default()
        .save_to_file(path)
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    println!("   ✨ Wrote default configuration to {}", path.display());
    Ok(())
}

fn cmd_info() -> Result<()> {
    let config = RevelaConfig::default();
    println!("🖋️  Revela Reveal Sequencer");
    println!("   Version:     {}", env!("CARGO_PKG_VERSION"));
    println!("   Corner:      {}", config.reveal.corner);
    println!(
        "   Breakpoint:  {}px (constrained at or below)",
        config.reveal.constrained_max_width
    );
    println!(
        "   Stagger:     {} default / {} constrained",
        config.timing.default.unit_delay, config.timing.constrained.unit_delay
    );
    println!(
        "   Fallback:    stroke {} at {}",
        config.style.fallback_stroke, config.style.stroke_width
    );
    Ok(())
}
