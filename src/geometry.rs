//! Lattice points and the segment-crossing test used to forbid crossing links.

use std::fmt;

use crate::constants::N;

/// A lattice point. Playable coordinates are `1..=N` on both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if the point lies on the `N`x`N` lattice.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (1..=N).contains(&self.x) && (1..=N).contains(&self.y)
    }

    /// True for the four corner points, which nobody may occupy.
    #[inline]
    pub fn is_corner(self) -> bool {
        (self.x == 1 || self.x == N) && (self.y == 1 || self.y == N)
    }

    /// Index into a row-major `N*N` grid. Only meaningful when `in_bounds`.
    #[inline]
    pub(crate) fn index(self) -> usize {
        ((self.y - 1) * N + (self.x - 1)) as usize
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// True if `a` and `b` are a knight's move apart.
#[inline]
pub fn is_knight_move(a: Point, b: Point) -> bool {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
}

/// Strict counter-clockwise test for the triangle `p, q, r`.
#[inline]
fn ccw(p: Point, q: Point, r: Point) -> bool {
    (r.y - p.y) * (q.x - p.x) > (q.y - p.y) * (r.x - p.x)
}

/// True iff segments `ab` and `cd` properly cross.
///
/// Segments sharing an endpoint never cross: two links meeting at a peg are
/// legal. Collinear overlaps are not special-cased.
pub fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    if a == c || a == d || b == c || b == d {
        return false;
    }
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}
