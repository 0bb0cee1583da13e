//! Core value types for the 5x5 board.
//!
//! Coordinates use `x` for the column and `y` for the row. BLUE starts on row
//! `y = 0` and RED on row `y = 4`; the temple of each color sits in column 2
//! of its home row.

use std::fmt;

use crate::errors::{EngineError, EngineResult};

pub use crate::game_state::cards::Card;
pub use crate::game_state::game_state::GameState;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 5;

/// Column holding each color's master at the start, and its temple.
pub const MASTER_COLUMN: u8 = 2;

/// Largest number of pawns a color can hold.
pub const MAX_PAWNS_PER_COLOR: usize = 4;

pub const RED_TEMPLE: Coordinate = Coordinate { x: MASTER_COLUMN, y: 4 };
pub const BLUE_TEMPLE: Coordinate = Coordinate { x: MASTER_COLUMN, y: 0 };

/// Player color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Red,
    Blue,
}

impl PieceColor {
    pub const ALL: [PieceColor; 2] = [PieceColor::Red, PieceColor::Blue];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceColor::Red => 0,
            PieceColor::Blue => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            PieceColor::Red => PieceColor::Blue,
            PieceColor::Blue => PieceColor::Red,
        }
    }

    /// Home row of this color.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            PieceColor::Red => 4,
            PieceColor::Blue => 0,
        }
    }

    /// This color's own temple square.
    #[inline]
    pub const fn temple(self) -> Coordinate {
        match self {
            PieceColor::Red => RED_TEMPLE,
            PieceColor::Blue => BLUE_TEMPLE,
        }
    }

    /// Multiplier applied to canonical card offsets. Cards are written from
    /// RED's facing; BLUE sits across the board and mirrors them.
    #[inline]
    pub const fn orientation(self) -> i8 {
        match self {
            PieceColor::Red => 1,
            PieceColor::Blue => -1,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::Red => write!(f, "red"),
            PieceColor::Blue => write!(f, "blue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Master,
}

/// Board square. Fields are public so positions can be written literally in
/// tables; anything built from outside input should go through [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

impl Coordinate {
    pub fn new(x: i16, y: i16) -> EngineResult<Self> {
        let limit = i16::from(BOARD_SIZE);
        if !(0..limit).contains(&x) || !(0..limit).contains(&y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        Ok(Self {
            x: x as u8,
            y: y as u8,
        })
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Error form of [`Coordinate::is_on_board`].
    #[inline]
    pub fn ensure_on_board(self) -> EngineResult<Self> {
        if self.is_on_board() {
            Ok(self)
        } else {
            Err(EngineError::OutOfBounds {
                x: i16::from(self.x),
                y: i16::from(self.y),
            })
        }
    }

    /// Square index `y * 5 + x`, used for occupancy masks.
    #[inline]
    pub const fn index(self) -> usize {
        (self.y as usize) * (BOARD_SIZE as usize) + self.x as usize
    }

    #[inline]
    pub const fn bit(self) -> u32 {
        1u32 << self.index()
    }

    /// Destination after shifting by `(dx, dy)`, or `None` when it leaves the board.
    #[inline]
    pub fn offset_by(self, dx: i8, dy: i8) -> Option<Coordinate> {
        let x = i16::from(self.x) + i16::from(dx);
        let y = i16::from(self.y) + i16::from(dy);
        Coordinate::new(x, y).ok()
    }

    /// Chebyshev distance: the number of single-step king moves between squares.
    #[inline]
    pub fn chebyshev_distance(self, other: Coordinate) -> u8 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub position: Coordinate,
}

/// A move: the piece on `origin` travels to `destination` using offset
/// `offset_index` of the mover's held card `card_index` (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub card_index: u8,
    pub offset_index: u8,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{} card {} offset {}",
            self.origin, self.destination, self.card_index, self.offset_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_new_rejects_off_board_values() {
        assert_eq!(
            Coordinate::new(5, 0),
            Err(EngineError::OutOfBounds { x: 5, y: 0 })
        );
        assert_eq!(
            Coordinate::new(0, -1),
            Err(EngineError::OutOfBounds { x: 0, y: -1 })
        );
        assert_eq!(Coordinate::new(4, 4), Ok(Coordinate { x: 4, y: 4 }));
    }

    #[test]
    fn offset_by_stays_inside_board() {
        let corner = Coordinate { x: 0, y: 0 };
        assert_eq!(corner.offset_by(-1, 0), None);
        assert_eq!(corner.offset_by(0, -2), None);
        assert_eq!(corner.offset_by(2, 1), Some(Coordinate { x: 2, y: 1 }));
        assert_eq!(Coordinate { x: 4, y: 4 }.offset_by(1, 0), None);
    }

    #[test]
    fn temples_face_each_other() {
        assert_eq!(PieceColor::Red.temple(), Coordinate { x: 2, y: 4 });
        assert_eq!(PieceColor::Blue.temple(), Coordinate { x: 2, y: 0 });
        assert_eq!(PieceColor::Red.opposite(), PieceColor::Blue);
        assert_eq!(
            PieceColor::Red.orientation(),
            -PieceColor::Blue.orientation()
        );
    }

    #[test]
    fn chebyshev_distance_counts_diagonals_as_one_step() {
        let a = Coordinate { x: 0, y: 4 };
        assert_eq!(a.chebyshev_distance(BLUE_TEMPLE), 4);
        assert_eq!(Coordinate { x: 1, y: 1 }.chebyshev_distance(BLUE_TEMPLE), 1);
        assert_eq!(BLUE_TEMPLE.chebyshev_distance(BLUE_TEMPLE), 0);
    }
}
