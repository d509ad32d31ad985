//! Mission Control - Simulated Orchestration Monitor
//!
//! Command-line entry point: tails the synthetic event stream and prints
//! fixture data and the effective configuration.

use clap::{Parser, Subcommand};
use mission_control_core::{
    catalog,
    error::Result,
    views::MissionBoard,
    EventHub, EventKind, EventStream, MissionControlConfig,
};
use std::path::PathBuf;
use tokio_stream::{StreamExt, StreamMap};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mission-control")]
#[command(about = "Simulated mission control monitor for hierarchical agent orchestration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Configuration file (TOML)
    #[arg(short, long, env = "MISSION_CONTROL_CONFIG")]
    config: Option<PathBuf>,

    /// Fixed RNG seed (overrides the config file)
    #[arg(long, env = "MISSION_CONTROL_SEED")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the simulated hub and print events as JSON lines
    Tail {
        /// Only this event kind (mission_update, agent_status, ...)
        #[arg(short, long)]
        kind: Option<EventKind>,

        /// Stop after this many events
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// List the seeded missions
    Missions,

    /// Show one mission with its subgoals and timeline
    Mission {
        /// Mission ID (e.g. MG-001)
        id: String,
    },

    /// Show one agent profile
    Agent {
        /// Agent ID (e.g. AGT-001)
        id: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!(
        "mission_control_core={level},mission_control={level}",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries the JSON lines
        .init();

    debug!("Mission Control v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = MissionControlConfig::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.hub.seed = cli.seed;
    }

    match cli.command {
        Commands::Tail { kind, count } => tail(config, kind, count).await,
        Commands::Missions => print_json(&MissionBoard::new().missions()),
        Commands::Mission { id } => print_json(&catalog::mission_detail(&id)?),
        Commands::Agent { id } => print_json(&catalog::agent_profile(&id)?),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn tail(config: MissionControlConfig, kind: Option<EventKind>, count: Option<usize>) -> Result<()> {
    let hub = EventHub::new(config.hub);

    let kinds: Vec<EventKind> = match kind {
        Some(kind) => vec![kind],
        None => EventKind::ALL.to_vec(),
    };
    let mut streams: StreamMap<EventKind, EventStream> = StreamMap::new();
    for kind in kinds {
        streams.insert(kind, hub.stream(kind));
    }

    hub.connect();
    info!("Tailing {} event kind(s)", streams.len());

    let mut printed = 0;
    loop {
        tokio::select! {
            next = streams.next() => {
                let Some((_, event)) = next else { break };
                println!("{}", event.to_json_line());

                printed += 1;
                if count.is_some_and(|limit| printed >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                break;
            }
        }
    }

    hub.shutdown();
    info!(
        "Printed {} event(s), {} dispatched, {} listener failure(s)",
        printed,
        hub.dispatched_count(),
        hub.failure_count()
    );
    Ok(())
}
