//! Across-Rust: a peg-and-link connection game with an MCTS opponent.
//!
//! Two players place pegs on a 24x24 lattice without corners. Pegs of the
//! same color a knight's move apart are linked unless the link would cross
//! an existing one. White wins by linking the top row to the bottom row,
//! Black by linking the left column to the right column.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`geometry`] - Lattice points and the segment-crossing test
//! - [`position`] - Core game logic (pegs, links, legality, win detection)
//! - [`heuristic`] - Cheap move scoring used by the search
//! - [`playout`] - Random game simulation for position evaluation
//! - [`mcts`] - Monte Carlo Tree Search with UCT
//! - [`config`] - Search settings and difficulty presets
//! - [`protocol`] - Line-based text protocol for front ends
//! - [`logging`] - Logger setup for the binary
//!
//! ## Example
//!
//! ```
//! use across_rust::config::SearchConfig;
//! use across_rust::mcts::search_move;
//! use across_rust::position::{Player, Position, parse_coord, play_move, str_coord};
//!
//! // Create a new game and let White open in the centre
//! let mut pos = Position::new();
//! play_move(&mut pos, parse_coord("L12").unwrap()).unwrap();
//!
//! // Run MCTS to find Black's reply
//! let mut rng = fastrand::Rng::with_seed(7);
//! let config = SearchConfig::with_iterations(50);
//! let best = search_move(&pos, &config, Player::Black, &mut rng).unwrap();
//! println!("Best move: {}", str_coord(best));
//! ```

pub mod config;
pub mod constants;
pub mod geometry;
pub mod heuristic;
pub mod logging;
pub mod mcts;
pub mod playout;
pub mod position;
pub mod protocol;
