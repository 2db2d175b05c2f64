//! Arena Items - Development Tools

use std::path::PathBuf;

use arena_core::codec::EncodeOptions;
use arena_core::rules::ArenaConfig;
use arena_tools::config_loader::{load_config, load_recording};
use arena_tools::inspect::{summarize, validate_recording};
use arena_tools::simulate::{run_battle, SimulationSettings};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "arena-tools")]
#[command(about = "Development tools for arena item battles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless demo battle and write its recording
    Simulate {
        /// Arena config (RON); built-in defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Recording output path
        #[arg(long, default_value = "battle.ron")]
        output: PathBuf,
        /// Turns per round
        #[arg(long, default_value_t = 500)]
        turns: u32,
        /// Number of seekers
        #[arg(long, default_value_t = 4)]
        seekers: usize,
        /// Randomly placed pickups
        #[arg(long, default_value_t = 6)]
        pickups: usize,
        /// Powerups on equally distributed points
        #[arg(long, default_value_t = 3)]
        powerups: usize,
        /// Round coordinates to this many decimals
        #[arg(long)]
        precision: Option<u32>,
        /// Leave the schema version out of every item
        #[arg(long)]
        no_schema_version: bool,
    },
    /// Print a per-round summary of a recording
    Inspect {
        /// Recording path
        path: PathBuf,
    },
    /// Decode every item of a recording, failing on any error
    Validate {
        /// Recording path
        path: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            output,
            turns,
            seekers,
            pickups,
            powerups,
            precision,
            no_schema_version,
        } => {
            let config = match config {
                Some(path) => match load_config(&path) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::error!("{e}");
                        std::process::exit(1);
                    }
                },
                None => ArenaConfig::default(),
            };

            let encode = EncodeOptions {
                trim_precision: precision,
                skip_version: no_schema_version,
            };
            let settings = SimulationSettings {
                turns_per_round: turns,
                seekers,
                pickups,
                powerups,
                encode,
                ..SimulationSettings::default()
            };

            let report = run_battle(config, &settings);
            tracing::info!(final_hash = report.final_hash, "Battle finished");
            if let Err(e) = report.recording.save(&output) {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        }
        Commands::Inspect { path } => match load_recording(&path) {
            Ok(recording) => print!("{}", summarize(&recording)),
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        },
        Commands::Validate { path } => {
            tracing::info!("Validating recording: {}", path.display());
            let recording = match load_recording(&path) {
                Ok(recording) => recording,
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            };
            let issues = validate_recording(&recording);
            if issues.is_empty() {
                tracing::info!("Validation passed");
            } else {
                for issue in &issues {
                    tracing::error!("{issue}");
                }
                tracing::error!("Validation failed: {} bad items", issues.len());
                std::process::exit(1);
            }
        }
    }
}
