//! Robowar CLI - turn-based robot battles.
//!
//! Single binary that provides:
//! - `robowar run <config>` - play a game, narrating each turn
//! - `robowar check <config>` - validate a config and show the roster

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use robowar_core::{GameConfig, Outcome, Simulation};

mod journal;
mod narrate;
mod render;

use journal::Journal;

#[derive(Parser)]
#[command(name = "robowar")]
#[command(about = "Turn-based robot battle simulator", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game to the end
    Run(RunArgs),

    /// Validate a config file and print the starting roster
    Check {
        /// Game config (YAML)
        config: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Game config (YAML)
    config: PathBuf,

    /// Random seed, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Turn limit, overriding the config
    #[arg(long)]
    turns: Option<u32>,

    /// Only print the final result
    #[arg(short, long)]
    quiet: bool,

    /// Write every event as JSON lines
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Write the final board snapshot as JSON
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => run_game(args),
        Commands::Check { config } => check_config(&config),
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    GameConfig::load(path)
        .with_context(|| format!("Failed to load game config from {}", path.display()))
}

fn run_game(args: RunArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(turns) = args.turns {
        config.turns = turns;
    }
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);

    let mut sim = Simulation::from_config(&config, seed).context("Failed to set up game")?;
    tracing::info!(seed, turns = config.turns, "Starting game");

    let mut journal = args
        .events_out
        .as_deref()
        .map(Journal::create)
        .transpose()?;

    if !args.quiet {
        println!("Seed: {seed}");
        print!("{}", render::board(&sim.snapshot()));
    }

    while sim.is_running() {
        let report = sim
            .advance_turn()
            .with_context(|| format!("Turn {} failed", sim.turn()))?;

        if let Some(journal) = journal.as_mut() {
            journal.record(&report.events)?;
        }

        if !args.quiet {
            println!();
            println!("Turn {}", report.turn);
            for line in report.events.iter().filter_map(narrate::line) {
                println!("  {line}");
            }
            print!("{}", render::board(&sim.snapshot()));
        }
    }

    if let Some(journal) = journal {
        journal.finish()?;
    }

    let snapshot = sim.snapshot();
    if let Some(path) = &args.snapshot_out {
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    }

    println!();
    println!("GAME OVER!");
    match sim.outcome() {
        Some(Outcome::Winner { name }) => println!("{name} wins after {} turns", snapshot.turn - 1),
        Some(Outcome::Extinct) => println!("No robots left standing"),
        Some(Outcome::TurnLimit) | None => {
            println!(
                "Turn limit reached with {} robots active and {} awaiting revival",
                snapshot.robots.len(),
                snapshot.awaiting_revival
            );
        }
    }

    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    let sim = Simulation::from_config(&config, config.seed.unwrap_or_default())
        .context("Config does not describe a playable game")?;

    println!("Config: {}", path.display());
    println!(
        "Board: {}x{}, {} turns",
        config.board.width, config.board.height, config.turns
    );
    println!("Robots: {}", sim.roster().len());
    for (id, _) in sim.roster().active_robots() {
        if let Some(profile) = sim.profile(id) {
            println!(
                "  - {} ({}) at {}, {}",
                profile.name, profile.kind, profile.pos.x, profile.pos.y
            );
        }
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
