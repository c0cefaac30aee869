//! Integration tests for across-rust
//!
//! These cover the game rules end to end (legality, links, connection) and
//! the behaviour of the search as seen from outside the crate.

use across_rust::config::SearchConfig;
use across_rust::constants::N;
use across_rust::geometry::{Point, segments_cross};
use across_rust::constants::{PROB_HEURISTIC_ROLLOUT, ROLLOUT_DEPTH};
use across_rust::mcts::{Tree, search_move, tree_search, tree_search_with};
use across_rust::playout::rollout;
use across_rust::position::{
    Player, Position, apply_move, check_win, is_terminal, parse_coord, play_move, valid_moves,
    winner,
};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Place pegs for one player regardless of whose turn it is.
fn place(pos: &mut Position, player: Player, pts: &[Point]) {
    for &pt in pts {
        pos.to_move = player;
        play_move(pos, pt).unwrap_or_else(|e| panic!("setup move {pt} failed: {e}"));
    }
}

/// A knight chain for White from row 1 to row N, zigzagging around column `x0`.
fn vertical_chain(x0: i32) -> Vec<Point> {
    let mut pts = Vec::new();
    let mut y = 1;
    let mut x = x0;
    while y < N {
        pts.push(p(x, y));
        x = if x == x0 { x0 + 1 } else { x0 };
        y += 2;
    }
    let last = *pts.last().unwrap();
    pts.push(p(last.x + 2, N));
    pts
}

/// The same chain rotated 90 degrees, for Black.
fn horizontal_chain(y0: i32) -> Vec<Point> {
    vertical_chain(y0).into_iter().map(|pt| p(pt.y, pt.x)).collect()
}

/// Fill the board for the side to move, leaving only `keep` empty.
fn fill_except(pos: &mut Position, keep: &[Point]) {
    let player = pos.to_move;
    for pt in valid_moves(pos) {
        if !keep.contains(&pt) {
            pos.to_move = player;
            apply_move(pos, pt);
        }
    }
    pos.to_move = player;
}

/// Fill columns 2..N-1 so that nobody can ever connect.
///
/// Interior pegs alternate color by (x + y) parity and a knight's move always
/// changes parity, so no two same-colored interior pegs link. White also owns
/// rows 1 and N, whose links reach no further than rows 3 and N-2.
fn stalled_board() -> Position {
    let mut pos = Position::new();
    for x in 2..N {
        for y in 1..=N {
            pos.to_move = if y == 1 || y == N || (x + y) % 2 == 0 {
                Player::White
            } else {
                Player::Black
            };
            apply_move(&mut pos, p(x, y));
        }
    }
    pos.to_move = Player::White;
    pos
}

fn assert_no_crossings(pos: &Position) {
    let links = pos.links();
    for (i, a) in links.iter().enumerate() {
        for b in &links[i + 1..] {
            assert!(
                !segments_cross(a.a, a.b, b.a, b.b),
                "links {:?} and {:?} cross",
                a,
                b
            );
        }
    }
}

// =============================================================================
// Move legality
// =============================================================================

#[test]
fn test_valid_moves_sound_and_complete() {
    let mut pos = Position::new();
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..120 {
        let moves = valid_moves(&pos);
        let player = pos.to_move;

        for x in 0..=N + 1 {
            for y in 0..=N + 1 {
                let pt = p(x, y);
                let legal = pt.in_bounds()
                    && !pt.is_corner()
                    && pos.at(pt).is_none()
                    && match player {
                        Player::White => x != 1 && x != N,
                        Player::Black => y != 1 && y != N,
                    };
                assert_eq!(moves.contains(&pt), legal, "{player} at {pt}");
            }
        }

        let mv = moves[rng.usize(..moves.len())];
        apply_move(&mut pos, mv);
    }
}

#[test]
fn test_valid_moves_deterministic() {
    let mut pos = Position::new();
    apply_move(&mut pos, p(5, 5));
    apply_move(&mut pos, p(9, 9));
    assert_eq!(valid_moves(&pos), valid_moves(&pos.clone()));
}

// =============================================================================
// Links
// =============================================================================

#[test]
fn test_links_never_cross_in_random_games() {
    for seed in 0..5 {
        let mut pos = Position::new();
        let mut rng = fastrand::Rng::with_seed(seed);
        // Play in a small window so links are dense and contested.
        let window: Vec<Point> = (9..=15)
            .flat_map(|x| (9..=15).map(move |y| p(x, y)))
            .collect();
        for _ in 0..45 {
            let moves: Vec<Point> = valid_moves(&pos)
                .into_iter()
                .filter(|m| window.contains(m))
                .collect();
            if moves.is_empty() {
                break;
            }
            apply_move(&mut pos, moves[rng.usize(..moves.len())]);
            assert_no_crossings(&pos);
        }
        assert!(!pos.links().is_empty());
    }
}

#[test]
fn test_link_endpoints_same_owner_knight_apart() {
    let mut pos = Position::new();
    let mut rng = fastrand::Rng::with_seed(77);
    for _ in 0..200 {
        let moves = valid_moves(&pos);
        apply_move(&mut pos, moves[rng.usize(..moves.len())]);
    }
    for l in pos.links() {
        assert_eq!(pos.at(l.a), Some(l.owner));
        assert_eq!(pos.at(l.b), Some(l.owner));
        assert!(across_rust::geometry::is_knight_move(l.a, l.b));
    }
}

#[test]
fn test_opponent_link_blocks() {
    let mut pos = Position::new();
    place(&mut pos, Player::Black, &[p(10, 10), p(12, 11)]);
    assert_eq!(pos.links().len(), 1);
    // White's (10,11)-(12,10) would cross Black's link.
    place(&mut pos, Player::White, &[p(10, 11), p(12, 10)]);
    assert_eq!(pos.links().len(), 1);
    assert_no_crossings(&pos);
}

// =============================================================================
// Win detection
// =============================================================================

#[test]
fn test_vertical_and_horizontal_chains_are_mirrors() {
    for offset in [2, 8, 15, 20] {
        let mut pos = Position::new();
        place(&mut pos, Player::White, &vertical_chain(offset));
        assert!(check_win(&pos, Player::White), "vertical chain at x={offset}");
        assert!(!check_win(&pos, Player::Black));

        let mut pos = Position::new();
        place(&mut pos, Player::Black, &horizontal_chain(offset));
        assert!(check_win(&pos, Player::Black), "horizontal chain at y={offset}");
        assert!(!check_win(&pos, Player::White));
    }
}

#[test]
fn test_broken_chain_does_not_win() {
    let mut chain = vertical_chain(10);
    chain.remove(6);
    let mut pos = Position::new();
    place(&mut pos, Player::White, &chain);
    assert!(!check_win(&pos, Player::White));
    assert!(!is_terminal(&pos));
}

#[test]
fn test_edge_pegs_without_links_do_not_win() {
    let mut pos = Position::new();
    place(&mut pos, Player::White, &[p(5, 1), p(18, N)]);
    place(&mut pos, Player::Black, &[p(1, 7), p(N, 19)]);
    assert!(pos.links().is_empty());
    assert_eq!(winner(&pos), None);
}

#[test]
fn test_blocked_chain_does_not_win() {
    // Black cuts the White chain by linking across the gap first.
    let chain = vertical_chain(10);
    let mut pos = Position::new();
    let (top, bottom) = chain.split_at(6);
    place(&mut pos, Player::White, top);
    // The hop from top.last() to bottom[0] is (11,11)->(10,13); block it.
    assert_eq!(top.last(), Some(&p(11, 11)));
    assert_eq!(bottom[0], p(10, 13));
    place(&mut pos, Player::Black, &[p(10, 12), p(12, 13)]);
    assert_eq!(pos.links().iter().filter(|l| l.owner == Player::Black).count(), 1);
    place(&mut pos, Player::White, bottom);
    assert!(!check_win(&pos, Player::White));
    assert_no_crossings(&pos);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_zero_budget_returns_legal_move() {
    let mut pos = Position::new();
    apply_move(&mut pos, p(12, 12));
    let moves = valid_moves(&pos);
    let mut rng = fastrand::Rng::with_seed(1);
    for _ in 0..20 {
        let mut tree = Tree::new(&pos);
        let mv = tree_search(&mut tree, 0, Player::Black, &mut rng).unwrap();
        assert!(moves.contains(&mv));
        assert_eq!(tree.len(), 1);
    }
}

#[test]
fn test_no_legal_move_returns_none() {
    let mut pos = Position::new();
    fill_except(&mut pos, &[]);
    assert!(valid_moves(&pos).is_empty());
    let mut rng = fastrand::Rng::with_seed(1);
    for budget in [0, 1, 10] {
        let mv = search_move(&pos, &SearchConfig::with_iterations(budget), Player::White, &mut rng);
        assert_eq!(mv, None);
    }
}

#[test]
fn test_stalled_board_rollout_has_no_winner() {
    let pos = stalled_board();
    assert!(valid_moves(&pos).is_empty());
    assert_eq!(winner(&pos), None);
    assert!(!is_terminal(&pos));
    assert!(!pos.links().is_empty());

    let mut rng = fastrand::Rng::with_seed(5);
    let mut sim = pos.clone();
    assert_eq!(rollout(&mut sim, ROLLOUT_DEPTH, PROB_HEURISTIC_ROLLOUT, &mut rng), None);
    assert_eq!(sim.pegs().len(), pos.pegs().len());

    for budget in [0, 1, 10] {
        let mv = search_move(&pos, &SearchConfig::with_iterations(budget), Player::White, &mut rng);
        assert_eq!(mv, None);
    }
}

#[test]
fn test_single_legal_move_is_chosen() {
    let only = p(13, 20);
    let mut pos = Position::new();
    fill_except(&mut pos, &[only]);
    assert_eq!(valid_moves(&pos), vec![only]);
    let mut rng = fastrand::Rng::with_seed(9);
    for budget in [1, 5, 40] {
        let mv = search_move(&pos, &SearchConfig::with_iterations(budget), Player::White, &mut rng);
        assert_eq!(mv, Some(only));
    }
}

#[test]
fn test_seeded_search_is_deterministic() {
    let mut pos = Position::new();
    apply_move(&mut pos, parse_coord("L12").unwrap());
    let config = SearchConfig::with_iterations(60);

    let mut t1 = Tree::new(&pos);
    let mut t2 = Tree::new(&pos);
    let m1 = tree_search_with(&mut t1, &config, Player::Black, &mut fastrand::Rng::with_seed(31));
    let m2 = tree_search_with(&mut t2, &config, Player::Black, &mut fastrand::Rng::with_seed(31));

    assert_eq!(m1, m2);
    assert_eq!(t1.len(), t2.len());
    assert!(t1.len() > 1);
    for id in t1.ids() {
        let (a, b) = (t1.get(id), t2.get(id));
        assert_eq!(a.mv, b.mv, "{id:?}");
        assert_eq!(a.parent, b.parent, "{id:?}");
        assert_eq!(a.children, b.children, "{id:?}");
        assert_eq!(a.visits, b.visits, "{id:?}");
        assert_eq!(a.score, b.score, "{id:?}");
    }
}

#[test]
fn test_winning_child_always_scores() {
    // Black needs one more peg on column N; that child's rollouts all start
    // from a won position.
    let chain = horizontal_chain(12);
    let (last, body) = chain.split_last().unwrap();
    let mut pos = Position::new();
    place(&mut pos, Player::Black, body);
    pos.to_move = Player::Black;
    assert!(!check_win(&pos, Player::Black));

    let n_moves = valid_moves(&pos).len();
    let config = SearchConfig::with_iterations(n_moves + 500);
    let mut tree = Tree::new(&pos);
    let mv = tree_search_with(&mut tree, &config, Player::Black, &mut fastrand::Rng::with_seed(3));
    assert!(valid_moves(&pos).contains(&mv.unwrap()));

    let root = tree.root();
    assert_eq!(tree.get(root).children.len(), n_moves);
    let win = tree
        .get(root)
        .children
        .iter()
        .map(|&c| tree.get(c))
        .find(|n| n.mv == Some(*last))
        .unwrap();
    assert!(win.visits >= 2, "winning child visited {} times", win.visits);
    assert_eq!(win.winrate(), 1.0);
}
