//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays moves from the given position until someone connects,
//! the depth limit is hit, or no legal move is left. Each move is the
//! heuristic pick with some probability, otherwise uniformly random.

use crate::constants::{PROB_HEURISTIC_ROLLOUT, ROLLOUT_DEPTH};
use crate::heuristic::select_move;
use crate::position::{Player, Position, apply_move, valid_moves, winner};

/// Perform a playout with the default depth and heuristic probability.
///
/// Returns the winner, or `None` if the playout was cut off or stalled.
pub fn mcplayout(pos: &mut Position, rng: &mut fastrand::Rng) -> Option<Player> {
    rollout(pos, ROLLOUT_DEPTH, PROB_HEURISTIC_ROLLOUT, rng)
}

/// Perform a playout of at most `max_depth` plies.
///
/// `heuristic_prob` is the chance that a ply uses the move heuristic instead
/// of a uniformly random legal move.
pub fn rollout(
    pos: &mut Position,
    max_depth: usize,
    heuristic_prob: f64,
    rng: &mut fastrand::Rng,
) -> Option<Player> {
    let mut depth = 0;
    loop {
        if let Some(w) = winner(pos) {
            return Some(w);
        }
        if depth >= max_depth {
            return None;
        }

        let moves = valid_moves(pos);
        if moves.is_empty() {
            return None;
        }
        let mv = if rng.f64() < heuristic_prob {
            select_move(pos, &moves, rng)?
        } else {
            moves[rng.usize(..moves.len())]
        };

        apply_move(pos, mv);
        depth += 1;
    }
}
