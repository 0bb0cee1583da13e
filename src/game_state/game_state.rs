//! Board position, hands, and side to move.
//!
//! `GameState` owns all of its containers, so `clone()` yields a fully
//! independent copy. Search relies on that: every explored move works on its
//! own clone and never touches the parent's pieces or cards.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::onitama_rules::{standard_layout, STANDARD_DEAL};
use crate::game_state::onitama_types::*;
use crate::utils::position_generator::generate_position;
use crate::utils::position_parser::parse_position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Master square per color, indexed by [`PieceColor::index`]. `None` once captured.
    pub masters: [Option<Coordinate>; 2],
    /// Pawn squares per color, in a stable order that move generation follows.
    pub pawns: [Vec<Coordinate>; 2],
    /// Held cards per color.
    pub hands: [[Card; 2]; 2],
    pub stored_card: Card,
    pub side_to_move: PieceColor,
}

impl GameState {
    /// Build a position and check every structural invariant.
    pub fn from_parts(
        masters: [Option<Coordinate>; 2],
        pawns: [Vec<Coordinate>; 2],
        hands: [[Card; 2]; 2],
        stored_card: Card,
        side_to_move: PieceColor,
    ) -> EngineResult<Self> {
        let state = Self {
            masters,
            pawns,
            hands,
            stored_card,
            side_to_move,
        };
        state.validate()?;
        Ok(state)
    }

    /// Standard opening layout. `cards[0..2]` go to BLUE, `cards[2..4]` to
    /// RED and `cards[4]` is stored. RED moves first.
    pub fn new_game(cards: [Card; 5]) -> EngineResult<Self> {
        let (masters, pawns) = standard_layout();
        Self::from_parts(
            masters,
            pawns,
            [[cards[2], cards[3]], [cards[0], cards[1]]],
            cards[4],
            PieceColor::Red,
        )
    }

    /// Opening layout with [`STANDARD_DEAL`].
    pub fn new_standard_game() -> EngineResult<Self> {
        Self::new_game(STANDARD_DEAL)
    }

    #[inline]
    pub fn from_notation(notation: &str) -> EngineResult<Self> {
        parse_position(notation)
    }

    #[inline]
    pub fn to_notation(&self) -> String {
        generate_position(self)
    }

    #[inline]
    pub fn master(&self, color: PieceColor) -> Option<Piece> {
        self.masters[color.index()].map(|position| Piece {
            kind: PieceKind::Master,
            color,
            position,
        })
    }

    #[inline]
    pub fn pawn_count(&self, color: PieceColor) -> usize {
        self.pawns[color.index()].len()
    }

    #[inline]
    pub fn cards(&self, color: PieceColor) -> [Card; 2] {
        self.hands[color.index()]
    }

    /// Pieces of `color`: master first (if alive), then pawns in stored order.
    pub fn pieces(&self, color: PieceColor) -> impl Iterator<Item = Piece> + '_ {
        let master = self.master(color);
        let pawns = self.pawns[color.index()].iter().map(move |&position| Piece {
            kind: PieceKind::Pawn,
            color,
            position,
        });
        master.into_iter().chain(pawns)
    }

    /// Occupancy mask for one color, one bit per square (see [`Coordinate::bit`]).
    pub fn occupancy(&self, color: PieceColor) -> u32 {
        self.pieces(color)
            .fold(0u32, |acc, piece| acc | piece.position.bit())
    }

    pub fn piece_at(&self, square: Coordinate) -> Option<Piece> {
        PieceColor::ALL
            .into_iter()
            .flat_map(|color| self.pieces(color))
            .find(|piece| piece.position == square)
    }

    /// Check the structural invariants: squares on the board and pairwise
    /// distinct, at most four pawns per color, five distinct cards.
    pub fn validate(&self) -> EngineResult<()> {
        let mut seen = 0u32;
        for color in PieceColor::ALL {
            if self.pawn_count(color) > MAX_PAWNS_PER_COLOR {
                return Err(EngineError::InvariantViolation(format!(
                    "{color} has {} pawns, at most {MAX_PAWNS_PER_COLOR} allowed",
                    self.pawn_count(color)
                )));
            }
            for piece in self.pieces(color) {
                let square = piece.position.ensure_on_board()?;
                if seen & square.bit() != 0 {
                    return Err(EngineError::InvariantViolation(format!(
                        "more than one piece on {square}"
                    )));
                }
                seen |= square.bit();
            }
        }

        let cards = self.all_cards();
        for (i, card) in cards.iter().enumerate() {
            if cards[i + 1..].contains(card) {
                return Err(EngineError::InvariantViolation(format!(
                    "card {card} appears more than once"
                )));
            }
        }

        Ok(())
    }

    /// The five cards in play: RED's hand, BLUE's hand, then the stored card.
    pub fn all_cards(&self) -> [Card; 5] {
        let red = self.hands[PieceColor::Red.index()];
        let blue = self.hands[PieceColor::Blue.index()];
        [red[0], red[1], blue[0], blue[1], self.stored_card]
    }
}
