//! Across position representation and move execution.
//!
//! This module provides the core game logic:
//! - Peg placement and link formation between same-colored pegs
//! - Border and corner restrictions for each player
//! - Connection detection via breadth-first search over links
//!
//! White is the vertical player: it may not play on the left and right
//! columns and wins by linking row 1 to row N. Black is the horizontal player:
//! it may not play on the top and bottom rows and wins by linking column 1 to
//! column N.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use thiserror::Error;

use crate::constants::{BOARDSIZE, KNIGHT_OFFSETS, N};
use crate::geometry::{Point, segments_cross};

/// One side of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Player 1, connects top to bottom.
    White,
    /// Player 2, connects left to right.
    Black,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Parse a color argument ("w", "white", "b", "black"), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Some(Player::White),
            "b" | "black" => Some(Player::Black),
            _ => None,
        }
    }

    /// True if this player may never place a peg at `pt`.
    #[inline]
    fn forbidden(self, pt: Point) -> bool {
        match self {
            Player::White => pt.x == 1 || pt.x == N,
            Player::Black => pt.y == 1 || pt.y == N,
        }
    }

    #[inline]
    fn on_start_edge(self, pt: Point) -> bool {
        match self {
            Player::White => pt.y == 1,
            Player::Black => pt.x == 1,
        }
    }

    #[inline]
    fn on_goal_edge(self, pt: Point) -> bool {
        match self {
            Player::White => pt.y == N,
            Player::Black => pt.x == N,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

/// A placed peg.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Peg {
    pub pt: Point,
    pub owner: Player,
}

/// An undirected link between two same-colored pegs a knight's move apart.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub a: Point,
    pub b: Point,
    pub owner: Player,
}

/// Reasons a move is rejected by [`play_move`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: {0} is off the board")]
    OutOfBounds(Point),
    #[error("illegal move: {0} is a corner")]
    Corner(Point),
    #[error("illegal move: {player} may not play on the border at {pt}")]
    ForbiddenBorder { player: Player, pt: Point },
    #[error("illegal move: {0} is occupied")]
    Occupied(Point),
    #[error("the opening peg must be the first peg on the board")]
    BoardNotEmpty,
}

/// An Across position (board state).
///
/// Pegs and links are kept in placement order. An occupancy grid mirrors the
/// peg list so legality checks don't have to scan it.
#[derive(Clone, Debug)]
pub struct Position {
    pegs: Vec<Peg>,
    links: Vec<Link>,
    /// Side to move
    pub to_move: Player,
    grid: [Option<Player>; BOARDSIZE],
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Empty board, White to move.
    pub fn new() -> Self {
        Position {
            pegs: Vec::new(),
            links: Vec::new(),
            to_move: Player::White,
            grid: [None; BOARDSIZE],
        }
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Owner of the peg at `pt`, if any.
    #[inline]
    pub fn at(&self, pt: Point) -> Option<Player> {
        if pt.in_bounds() {
            self.grid[pt.index()]
        } else {
            None
        }
    }

    pub fn peg_count(&self, player: Player) -> usize {
        self.pegs.iter().filter(|p| p.owner == player).count()
    }
}

/// Reset a position to the empty board with White to move.
pub fn empty_position(pos: &mut Position) {
    *pos = Position::new();
}

/// Check whether `player` may place a peg at `pt`.
pub fn check_legal(pos: &Position, pt: Point, player: Player) -> Result<(), MoveError> {
    if !pt.in_bounds() {
        return Err(MoveError::OutOfBounds(pt));
    }
    if pt.is_corner() {
        return Err(MoveError::Corner(pt));
    }
    if player.forbidden(pt) {
        return Err(MoveError::ForbiddenBorder { player, pt });
    }
    if pos.grid[pt.index()].is_some() {
        return Err(MoveError::Occupied(pt));
    }
    Ok(())
}

/// All legal moves for the side to move, in column-major order.
pub fn valid_moves(pos: &Position) -> Vec<Point> {
    let player = pos.to_move;
    let mut moves = Vec::with_capacity(BOARDSIZE - pos.pegs.len());
    for x in 1..=N {
        for y in 1..=N {
            let pt = Point::new(x, y);
            if pt.is_corner() || player.forbidden(pt) {
                continue;
            }
            if pos.grid[pt.index()].is_none() {
                moves.push(pt);
            }
        }
    }
    moves
}

/// Place a peg for the side to move without checking legality.
///
/// Links are formed to every own peg a knight's move away unless the new link
/// would cross an existing one (either color, including links made earlier in
/// this same move). Returns the number of links formed.
///
/// The caller must have validated `pt`, e.g. via [`valid_moves`].
pub fn apply_move(pos: &mut Position, pt: Point) -> usize {
    let player = pos.to_move;
    debug_assert!(
        check_legal(pos, pt, player).is_ok(),
        "apply_move called with illegal point {pt} for {player}"
    );

    pos.pegs.push(Peg { pt, owner: player });
    pos.grid[pt.index()] = Some(player);

    let mut formed = 0;
    for (dx, dy) in KNIGHT_OFFSETS {
        let other = Point::new(pt.x + dx, pt.y + dy);
        if pos.at(other) != Some(player) {
            continue;
        }
        let crosses = pos
            .links
            .iter()
            .any(|l| segments_cross(pt, other, l.a, l.b));
        if !crosses {
            pos.links.push(Link {
                a: pt,
                b: other,
                owner: player,
            });
            formed += 1;
        }
    }

    pos.to_move = player.other();
    formed
}

/// Play a move at the given point after validating it.
///
/// Returns the links formed by the move.
///
/// # Errors
/// Fails with a [`MoveError`] if the point is off the board, a corner, on a
/// border forbidden to the side to move, or already occupied. The position is
/// left untouched in that case.
pub fn play_move(pos: &mut Position, pt: Point) -> Result<&[Link], MoveError> {
    check_legal(pos, pt, pos.to_move)?;
    let before = pos.links.len();
    apply_move(pos, pt);
    Ok(&pos.links[before..])
}

/// Place the neutral first peg.
///
/// The opening peg is always White and must keep off the border rows and
/// columns. Black moves next.
pub fn play_opening(pos: &mut Position, pt: Point) -> Result<(), MoveError> {
    if !pos.pegs.is_empty() {
        return Err(MoveError::BoardNotEmpty);
    }
    if !(2..N).contains(&pt.x) || !(2..N).contains(&pt.y) {
        return Err(if pt.in_bounds() {
            MoveError::ForbiddenBorder {
                player: Player::White,
                pt,
            }
        } else {
            MoveError::OutOfBounds(pt)
        });
    }
    pos.to_move = Player::White;
    apply_move(pos, pt);
    Ok(())
}

/// Pick the engine's opening point: near the centre, off the border.
pub fn random_opening(rng: &mut fastrand::Rng) -> Point {
    use crate::constants::{CENTER, OPENING_SPREAD};

    let c = CENTER.round() as i32;
    let x = (c + rng.i32(-OPENING_SPREAD..=OPENING_SPREAD)).clamp(2, N - 1);
    let y = (c + rng.i32(-OPENING_SPREAD..=OPENING_SPREAD)).clamp(2, N - 1);
    Point::new(x, y)
}

/// True if `player` has a chain of linked pegs between its two edges.
///
/// Breadth-first search over the player's links, seeded from every peg on the
/// player's start edge.
pub fn check_win(pos: &Position, player: Player) -> bool {
    let mut adj: HashMap<Point, Vec<Point>> = pos
        .pegs
        .iter()
        .filter(|p| p.owner == player)
        .map(|p| (p.pt, Vec::new()))
        .collect();
    if adj.is_empty() {
        return false;
    }

    for l in pos.links.iter().filter(|l| l.owner == player) {
        if adj.contains_key(&l.a) && adj.contains_key(&l.b) {
            if let Some(v) = adj.get_mut(&l.a) {
                v.push(l.b);
            }
            if let Some(v) = adj.get_mut(&l.b) {
                v.push(l.a);
            }
        }
    }

    let mut visited = [false; BOARDSIZE];
    let mut queue: VecDeque<Point> = VecDeque::new();
    for &pt in adj.keys() {
        if player.on_start_edge(pt) {
            visited[pt.index()] = true;
            queue.push_back(pt);
        }
    }

    while let Some(cur) = queue.pop_front() {
        if player.on_goal_edge(cur) {
            return true;
        }
        for &nb in &adj[&cur] {
            if !visited[nb.index()] {
                visited[nb.index()] = true;
                queue.push_back(nb);
            }
        }
    }
    false
}

/// True once either side has connected its edges.
pub fn is_terminal(pos: &Position) -> bool {
    check_win(pos, Player::White) || check_win(pos, Player::Black)
}

/// The winner, if any.
///
/// White is checked before Black. Should both sides be connected at once,
/// White is reported.
pub fn winner(pos: &Position) -> Option<Player> {
    if check_win(pos, Player::White) {
        Some(Player::White)
    } else if check_win(pos, Player::Black) {
        Some(Player::Black)
    } else {
        None
    }
}

/// Parse a coordinate string (e.g. "L12") into a Point.
///
/// The column letter runs from A (x = 1) to X (x = 24); the number is the row.
/// Returns `None` for anything that is not a point on the board.
pub fn parse_coord(s: &str) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let col = chars.next()?.to_ascii_uppercase();
    if !col.is_ascii_uppercase() {
        return None;
    }
    let x = (col as u8 - b'A') as i32 + 1;
    let row = chars.as_str();
    if row.is_empty() || row.starts_with('0') || !row.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let y: i32 = row.parse().ok()?;
    let pt = Point::new(x, y);
    pt.in_bounds().then_some(pt)
}

/// Convert a Point to a coordinate string (e.g. "L12").
pub fn str_coord(pt: Point) -> String {
    let col = (b'A' + (pt.x - 1) as u8) as char;
    format!("{col}{}", pt.y)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 1..=N {
            write!(f, "{} ", (b'A' + (x - 1) as u8) as char)?;
        }
        writeln!(f)?;
        for y in 1..=N {
            write!(f, "{y:>2} ")?;
            for x in 1..=N {
                let pt = Point::new(x, y);
                let ch = match self.at(pt) {
                    Some(Player::White) => 'W',
                    Some(Player::Black) => 'B',
                    None if pt.is_corner() => ' ',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "white: {} pegs, black: {} pegs, {} links, {} to move",
            self.peg_count(Player::White),
            self.peg_count(Player::Black),
            self.links.len(),
            self.to_move
        )
    }
}
