//! The fixed 16-card movement catalog.
//!
//! Offsets are canonical, written from RED's facing (negative `dy` moves
//! toward BLUE's home row). Order within each card matters: moves refer to an
//! offset by its index.

use std::fmt;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::onitama_types::PieceColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Card {
    Tiger,
    Dragon,
    Frog,
    Rabbit,
    Crab,
    Elephant,
    Goose,
    Rooster,
    Monkey,
    Mantis,
    Horse,
    Ox,
    Crane,
    Boar,
    Eel,
    Cobra,
}

impl Card {
    pub const ALL: [Card; 16] = [
        Card::Tiger,
        Card::Dragon,
        Card::Frog,
        Card::Rabbit,
        Card::Crab,
        Card::Elephant,
        Card::Goose,
        Card::Rooster,
        Card::Monkey,
        Card::Mantis,
        Card::Horse,
        Card::Ox,
        Card::Crane,
        Card::Boar,
        Card::Eel,
        Card::Cobra,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Card::Tiger => "tiger",
            Card::Dragon => "dragon",
            Card::Frog => "frog",
            Card::Rabbit => "rabbit",
            Card::Crab => "crab",
            Card::Elephant => "elephant",
            Card::Goose => "goose",
            Card::Rooster => "rooster",
            Card::Monkey => "monkey",
            Card::Mantis => "mantis",
            Card::Horse => "horse",
            Card::Ox => "ox",
            Card::Crane => "crane",
            Card::Boar => "boar",
            Card::Eel => "eel",
            Card::Cobra => "cobra",
        }
    }

    pub const fn offsets(self) -> &'static [(i8, i8)] {
        match self {
            Card::Tiger => &[(0, -2), (0, 1)],
            Card::Dragon => &[(-2, -1), (2, -1), (-1, 1), (1, 1)],
            Card::Frog => &[(-1, -1), (-2, 0), (1, 1)],
            Card::Rabbit => &[(1, -1), (2, 0), (-1, 1)],
            Card::Crab => &[(0, -1), (-2, 0), (2, 0)],
            Card::Elephant => &[(-1, -1), (1, -1), (-1, 0), (1, 0)],
            Card::Goose => &[(-1, -1), (-1, 0), (1, 0), (1, 1)],
            Card::Rooster => &[(1, -1), (-1, 0), (1, 0), (-1, 1)],
            Card::Monkey => &[(-1, -1), (1, -1), (-1, 1), (1, 1)],
            Card::Mantis => &[(-1, -1), (1, -1), (0, 1)],
            Card::Horse => &[(0, -1), (-1, 0), (0, 1)],
            Card::Ox => &[(0, -1), (1, 0), (0, 1)],
            Card::Crane => &[(0, -1), (-1, 1), (1, 1)],
            Card::Boar => &[(0, -1), (-1, 0), (1, 0)],
            Card::Eel => &[(-1, -1), (1, 0), (-1, 1)],
            Card::Cobra => &[(1, -1), (-1, 0), (1, 1)],
        }
    }

    /// Offset `offset_index` as applied by `color`, or `None` if the card has
    /// fewer offsets.
    #[inline]
    pub fn oriented_offset(self, color: PieceColor, offset_index: usize) -> Option<(i8, i8)> {
        let (dx, dy) = *self.offsets().get(offset_index)?;
        let sign = color.orientation();
        Some((dx * sign, dy * sign))
    }

    pub fn from_name(name: &str) -> EngineResult<Card> {
        Card::ALL
            .iter()
            .copied()
            .find(|card| card.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| EngineError::UnknownCard(name.to_owned()))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
