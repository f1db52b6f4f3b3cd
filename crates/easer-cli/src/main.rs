use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use easer_core::{AnimationConfig, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "easer")]
#[command(author, version, about = "Run and inspect eased animations in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/easer/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an animation in real time, printing every frame
    Run {
        #[command(flatten)]
        animation: AnimationArgs,
        /// Frames per second
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        fps: Option<u32>,
        /// Pause after this many milliseconds
        #[arg(long)]
        pause_at: Option<u64>,
        /// Resume this many milliseconds after pausing
        #[arg(long, requires = "pause_at")]
        resume_after: Option<u64>,
        /// Flip direction after this many milliseconds
        #[arg(long)]
        reverse_at: Option<u64>,
        /// Stop after this many milliseconds
        #[arg(long)]
        stop_after: Option<u64>,
        /// Print statuses as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print statuses at evenly spaced points of one pass
    Sample {
        #[command(flatten)]
        animation: AnimationArgs,
        /// Number of intervals to sample
        #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=10_000))]
        steps: u32,
        /// Print samples as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available easing curves
    List,
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Replace an existing file
        #[arg(short = 'f', long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

/// Per-run overrides of the configured animation
#[derive(Args, Debug, Default)]
struct AnimationArgs {
    /// Easing curve name
    #[arg(short = 'e', long)]
    easing: Option<String>,
    /// Starting value
    #[arg(long, allow_negative_numbers = true)]
    from: Option<f64>,
    /// Ending value
    #[arg(long, allow_negative_numbers = true)]
    to: Option<f64>,
    /// Duration in milliseconds
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    duration: Option<f64>,
    /// Restart after each pass
    #[arg(long = "loop")]
    looping: bool,
    /// Travel from `to` back to `from`
    #[arg(short = 'r', long)]
    reverse: bool,
}

impl AnimationArgs {
    fn merge(self, base: &AnimationConfig) -> AnimationConfig {
        AnimationConfig {
            easing: self.easing.unwrap_or_else(|| base.easing.clone()),
            from: self.from.unwrap_or(base.from),
            to: self.to.unwrap_or(base.to),
            duration_ms: self.duration.unwrap_or(base.duration_ms),
            looping: self.looping || base.looping,
            reverse: self.reverse || base.reverse,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // Initialize logging on stderr so stdout carries only animation output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Run {
            animation,
            fps,
            pause_at,
            resume_after,
            reverse_at,
            stop_after,
            json,
        }) => {
            let mut frame = config.frame.clone();
            if let Some(fps) = fps {
                frame.fps = fps;
            }
            let schedule = commands::run::ControlSchedule {
                pause_at,
                resume_after,
                reverse_at,
                stop_after,
            };
            commands::run::run(animation.merge(&config.animation), &frame, schedule, json).await
        }
        Some(Commands::Sample {
            animation,
            steps,
            json,
        }) => commands::sample::run(animation.merge(&config.animation), steps, json),
        Some(Commands::List) | None => commands::list::run(&config.animation),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}
