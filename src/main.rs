//! Across-Rust: a peg-and-link connection game engine.
//!
//! ## Usage
//!
//! - `across-rust` - Show a demo
//! - `across-rust protocol` - Start the text protocol server for a front end
//! - `across-rust demo` - Run the MCTS demo
//! - `across-rust selfplay` - Let the engine play a full game against itself

use clap::{Parser, Subcommand};

use across_rust::config::{Difficulty, SearchConfig};
use across_rust::logging::setup_logging;
use across_rust::mcts::{Tree, tree_search_with};
use across_rust::position::{
    Player, Position, parse_coord, play_move, play_opening, random_opening, str_coord, winner,
};
use across_rust::protocol::ProtocolEngine;

/// Across-Rust: a peg-and-link connection game with an MCTS opponent
#[derive(Parser)]
#[command(name = "across-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level or module filter; RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Search budget shared by the subcommands that search.
#[derive(clap::Args)]
struct SearchArgs {
    /// Named iteration budget
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Explicit iterations per move; overrides --difficulty
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for the random source (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig::with_iterations(self.iterations.unwrap_or(self.difficulty.iterations()))
    }

    fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the line-based text protocol server on stdin/stdout
    Protocol {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Run a simple demo of the engine
    Demo,
    /// Play an engine-vs-engine game and print the result
    Selfplay {
        #[command(flatten)]
        search: SearchArgs,

        /// Stop after this many moves even without a winner
        #[arg(long, default_value_t = 300)]
        max_moves: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Protocol { search }) => {
            let mut engine = ProtocolEngine::with_config(search.config(), search.rng());
            engine.run()?;
        }
        Some(Commands::Selfplay { search, max_moves }) => {
            run_selfplay(&search.config(), &mut search.rng(), max_moves)?;
        }
        Some(Commands::Demo) | None => {
            run_demo()?;
        }
    }
    Ok(())
}

fn run_demo() -> anyhow::Result<()> {
    println!("Across-Rust: peg-and-link MCTS engine\n");

    println!("=== Links Demo ===");
    let mut pos = Position::new();
    for (color, v) in [
        (Player::White, "L12"),
        (Player::Black, "P10"),
        (Player::White, "M14"),
        (Player::Black, "R11"),
    ] {
        let pt = parse_coord(v).ok_or_else(|| anyhow::anyhow!("bad vertex {v}"))?;
        pos.to_move = color;
        let links = play_move(&mut pos, pt)?;
        println!("{color} at {v}: {} new link(s)", links.len());
    }
    println!("{pos}");

    println!("=== MCTS Demo ===");
    let mut rng = fastrand::Rng::new();
    let mut tree = Tree::new(&pos);
    let config = SearchConfig::with_iterations(100);

    println!("Running {} MCTS iterations for white...", config.iterations);
    let best = tree_search_with(&mut tree, &config, Player::White, &mut rng);
    println!("Best move: {}", best.map_or_else(|| "none".to_string(), str_coord));
    println!("Root score: {:.3}", tree.get(tree.root()).winrate());
    Ok(())
}

fn run_selfplay(
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
    max_moves: usize,
) -> anyhow::Result<()> {
    let mut pos = Position::new();
    let opening = random_opening(rng);
    play_opening(&mut pos, opening)?;
    println!("1. white {} (opening)", str_coord(opening));

    let mut n = 1;
    while winner(&pos).is_none() && n < max_moves {
        let color = pos.to_move;
        let mut tree = Tree::new(&pos);
        let Some(mv) = tree_search_with(&mut tree, config, color, rng) else {
            println!("{color} has no move");
            break;
        };
        let links = play_move(&mut pos, mv)?;
        n += 1;
        println!("{n}. {color} {} (+{} links)", str_coord(mv), links.len());
    }

    println!("\n{pos}");
    match winner(&pos) {
        Some(w) => println!("{w} wins after {n} moves"),
        None => println!("no winner after {n} moves"),
    }
    Ok(())
}
