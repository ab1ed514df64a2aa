// Core value types shared by the board, move generator and strategies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier, 1..=4. Cell value 0 means empty.
pub type PlayerId = u8;

/// Cell value for an empty square
pub const EMPTY: u8 = 0;

/// 2D coordinate on the board (row, col), 0-indexed from the top-left
///
/// Signed so that stepping off the board yields a coordinate that
/// `Grid::in_bounds` rejects instead of wrapping.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Offsets this position by `steps` cells in the given direction
    pub fn offset(&self, dir: Direction, steps: i32) -> Position {
        let (dr, dc) = dir.delta();
        Position {
            row: self.row + dr * steps,
            col: self.col + dc * steps,
        }
    }

    /// Calculates Manhattan distance between two positions
    pub fn manhattan(&self, other: Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position { row, col }
    }
}

/// A piece relocation from one cell to another
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The eight compass directions a piece can step or jump in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// The four orthogonal directions used by basic steps
    pub fn orthogonal() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// All eight directions used by jumps
    pub fn all() -> [Direction; 8] {
        [
            Direction::UpLeft,
            Direction::Up,
            Direction::UpRight,
            Direction::Left,
            Direction::Right,
            Direction::DownLeft,
            Direction::Down,
            Direction::DownRight,
        ]
    }

    /// Row/column delta of a single step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }
}

/// Board corners, used to place home and target regions
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// The diagonally opposite corner
    pub fn opposite(&self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_manhattan() {
        let p = Position::new(5, 5);
        assert_eq!(p.offset(Direction::Right, 2), Position::new(5, 7));
        assert_eq!(p.offset(Direction::UpLeft, 1), Position::new(4, 4));
        assert_eq!(p.manhattan(Position::new(11, 11)), 12);
    }

    #[test]
    fn test_opposite_corner_is_involution() {
        for c in [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ] {
            assert_ne!(c.opposite(), c);
            assert_eq!(c.opposite().opposite(), c);
        }
    }
}
