//! Grid coordinates and the four cardinal step directions.

use std::ops::{Add, Sub};

/// A zero-indexed `(row, col)` cell on the board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    /// Builds the point `(row, col)`.
    #[inline]
    pub fn new(row: i32, col: i32) -> Point {
        Point { row, col }
    }

    /// Manhattan (taxicab) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Point) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// A unit step in one of the four cardinal directions, expressed as `(row delta, col delta)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub dr: i32,
    pub dc: i32,
}

impl Move {
    /// One row up: `(-1, 0)`.
    pub const UP: Move = Move { dr: -1, dc: 0 };
    /// One row down: `(+1, 0)`.
    pub const DOWN: Move = Move { dr: 1, dc: 0 };
    /// One column left: `(0, -1)`.
    pub const LEFT: Move = Move { dr: 0, dc: -1 };
    /// One column right: `(0, +1)`.
    pub const RIGHT: Move = Move { dr: 0, dc: 1 };

    /// All four cardinal directions, in a fixed deterministic order.
    pub const ALL: [Move; 4] = [Move::UP, Move::DOWN, Move::LEFT, Move::RIGHT];

    /// The reverse of this direction.
    #[inline]
    pub fn opposite(self) -> Move {
        Move { dr: -self.dr, dc: -self.dc }
    }
}

impl Add<Move> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Move) -> Point {
        Point::new(self.row + rhs.dr, self.col + rhs.dc)
    }
}

impl Sub<Point> for Point {
    type Output = Move;

    #[inline]
    fn sub(self, rhs: Point) -> Move {
        Move { dr: self.row - rhs.row, dc: self.col - rhs.col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(Point::new(0, 0).manhattan(Point::new(3, 4)), 7);
        assert_eq!(Point::new(2, 2).manhattan(Point::new(2, 2)), 0);
    }

    #[test]
    fn move_opposite_round_trips() {
        for m in Move::ALL {
            assert_eq!(m.opposite().opposite(), m);
        }
    }

    #[test]
    fn point_add_move_and_subtract_back() {
        let p = Point::new(4, 4);
        for m in Move::ALL {
            let q = p + m;
            assert_eq!(q - p, m);
        }
    }
}
