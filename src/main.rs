use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use isolation::ai::{Algorithm, HeuristicKind};
use isolation::config::AppConfig;
use isolation::game::{GameState, PlayerKind, Side};
use isolation::manager::GameManager;

/// Play a game of isolation against the computer.
#[derive(Parser)]
#[command(name = "isolation", about = "Play isolation against a minimax search")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "isolation.toml")]
    config: PathBuf,

    /// Override board width
    #[arg(long)]
    width: Option<usize>,

    /// Override board height
    #[arg(long)]
    height: Option<usize>,

    /// Override search algorithm
    #[arg(long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Override cutoff heuristic
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicKind>,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Search every line to the end of the game, ignoring depth
    #[arg(long)]
    exhaustive: bool,

    /// Seed for choosing who moves first
    #[arg(long)]
    seed: Option<u64>,

    /// Let the computer play both sides
    #[arg(long)]
    watch: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(algorithm) = cli.algorithm {
        config.search.algorithm = algorithm;
    }
    if let Some(heuristic) = cli.heuristic {
        config.search.heuristic = heuristic;
    }
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if cli.exhaustive {
        config.search.exhaustive = true;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.watch {
        config.player_one.kind = PlayerKind::Computer.to_string();
        config.player_two.kind = PlayerKind::Computer.to_string();
    }
    config.validate().context("invalid configuration")?;

    let player_one = config.player_one.to_player()?;
    let player_two = config.player_two.to_player()?;
    let agent_one = config.build_agent(&player_one);
    let agent_two = config.build_agent(&player_two);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let board = config.build_board()?;
    let state = GameState::with_random_first(board, player_one, player_two, &mut rng);

    println!(
        "Isolation on a {}x{} board: {} vs {}. {} moves first.",
        config.board.width,
        config.board.height,
        state.player(Side::PlayerOne),
        state.player(Side::PlayerTwo),
        state.active_player().name(),
    );

    let mut manager = GameManager::new(state, agent_one, agent_two);
    let report = manager.run().context("game aborted")?;

    println!("{}", manager.state());
    if report.resigned {
        println!(
            "{} resigned. {} wins after {} moves.",
            report.loser_name, report.winner_name, report.moves
        );
    } else {
        println!(
            "{} has no legal move left. {} wins after {} moves.",
            report.loser_name, report.winner_name, report.moves
        );
    }

    Ok(())
}
