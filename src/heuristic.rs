//! Cheap positional move heuristic.
//!
//! Used by the search to order expansion and to bias playouts. It never
//! feeds into UCT itself. A move is scored for the side to move by:
//! - distance from the centre (penalty)
//! - progress toward the far edge (horizontal player) or staying near the
//!   centre line (vertical player)
//! - the number of own pegs a knight's move away, i.e. potential links.
//!   Crossings are ignored, so this is an upper bound on links formed.

use crate::constants::{CENTER, HEURISTIC_SAMPLE, KNIGHT_OFFSETS, W_ADVANCE, W_CENTER, W_LINK};
use crate::geometry::Point;
use crate::position::{Player, Position};

/// Score a candidate move for the side to move. Higher is better.
pub fn score_move(pos: &Position, mv: Point) -> f64 {
    let player = pos.to_move;
    let x = mv.x as f64;
    let y = mv.y as f64;

    let mut score = -W_CENTER * ((x - CENTER).abs() + (y - CENTER).abs());
    score += match player {
        Player::Black => W_ADVANCE * x,
        Player::White => -W_ADVANCE * (y - CENTER).abs(),
    };

    let partners = KNIGHT_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| pos.at(Point::new(mv.x + dx, mv.y + dy)) == Some(player))
        .count();
    score + W_LINK * partners as f64
}

/// Pick a good move from `moves` for the side to move.
///
/// Large candidate sets are sampled down to [`HEURISTIC_SAMPLE`] moves first,
/// so the result is the best of the sample rather than the global best. Ties
/// go to the first move seen. Returns `None` only when `moves` is empty.
pub fn select_move(pos: &Position, moves: &[Point], rng: &mut fastrand::Rng) -> Option<Point> {
    if moves.is_empty() {
        return None;
    }

    let sampled;
    let candidates = if moves.len() > HEURISTIC_SAMPLE {
        sampled = sample(moves, HEURISTIC_SAMPLE, rng);
        &sampled[..]
    } else {
        moves
    };

    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;
    for &mv in candidates {
        let s = score_move(pos, mv);
        if s > best_score {
            best_score = s;
            best = Some(mv);
        }
    }

    best.or_else(|| Some(moves[rng.usize(..moves.len())]))
}

/// Uniform random sample of `k` moves, in random order.
fn sample(moves: &[Point], k: usize, rng: &mut fastrand::Rng) -> Vec<Point> {
    let mut pool = moves.to_vec();
    let n = pool.len();
    for i in 0..k.min(n) {
        let j = rng.usize(i..n);
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}
