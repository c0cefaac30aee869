//! Constants for board geometry, search parameters and heuristic weights.
//!
//! Board size and the corner/border exclusion rules are fixed at compile time.
//! The search parameters here are the defaults behind
//! [`SearchConfig`](crate::mcts::SearchConfig).

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Coordinates run from 1 to N on both axes.
pub const N: i32 = 24;

/// Number of lattice points, used to size the occupancy grid.
pub const BOARDSIZE: usize = (N * N) as usize;

/// Board centre on both axes. Not a lattice point for even N.
pub const CENTER: f64 = (N as f64 + 1.0) / 2.0;

/// Knight's-move offsets. A link may only join pegs at one of these offsets.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// UCT exploration constant (roughly sqrt(2)).
pub const UCT_C: f64 = 1.414;

/// Maximum number of plies in one rollout.
pub const ROLLOUT_DEPTH: usize = 60;

/// Probability that a rollout ply uses the heuristic instead of a random move.
pub const PROB_HEURISTIC_ROLLOUT: f64 = 0.3;

// =============================================================================
// Difficulty Presets (iterations per move)
// =============================================================================

pub const ITERS_EASY: usize = 150;
pub const ITERS_MEDIUM: usize = 500;
pub const ITERS_HARD: usize = 1500;

// =============================================================================
// Move Heuristic Weights
// =============================================================================

/// Candidate sets larger than this are sampled down before scoring.
pub const HEURISTIC_SAMPLE: usize = 20;

/// Penalty per unit of Manhattan distance from the centre.
pub const W_CENTER: f64 = 0.5;

/// Per-column bonus for the horizontal player, and per-row penalty away from
/// the centre line for the vertical player.
pub const W_ADVANCE: f64 = 0.3;

/// Bonus for every own peg a knight's move away from the candidate.
pub const W_LINK: f64 = 2.0;

// =============================================================================
// Opening
// =============================================================================

/// Maximum offset from the centre for the engine's opening peg.
pub const OPENING_SPREAD: i32 = 2;
