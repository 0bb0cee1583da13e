//! Opening layout and card dealing.

use rand::Rng;

use crate::game_state::cards::Card;
use crate::game_state::onitama_types::{Coordinate, PieceColor, BOARD_SIZE, MASTER_COLUMN};

/// Board field of the opening position in position notation.
pub const STARTING_BOARD: &str = "ppmpp/5/5/5/PPMPP";

/// Fixed deal used when a reproducible opening is needed (tests, benches).
/// Order follows [`crate::game_state::game_state::GameState::new_game`].
pub const STANDARD_DEAL: [Card; 5] = [Card::Frog, Card::Rabbit, Card::Tiger, Card::Crab, Card::Eel];

/// Masters and pawns of the opening: each color fills its home row with the
/// master in the middle column.
pub fn standard_layout() -> ([Option<Coordinate>; 2], [Vec<Coordinate>; 2]) {
    let mut masters = [None; 2];
    let mut pawns = [Vec::new(), Vec::new()];

    for color in PieceColor::ALL {
        let y = color.home_row();
        for x in 0..BOARD_SIZE {
            let square = Coordinate { x, y };
            if x == MASTER_COLUMN {
                masters[color.index()] = Some(square);
            } else {
                pawns[color.index()].push(square);
            }
        }
    }

    (masters, pawns)
}

/// Draw five distinct cards from the catalog.
pub fn deal_cards<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    let picks = rand::seq::index::sample(rng, Card::ALL.len(), 5);
    let mut dealt = [Card::Tiger; 5];
    for (slot, idx) in dealt.iter_mut().zip(picks.iter()) {
        *slot = Card::ALL[idx];
    }
    dealt
}
