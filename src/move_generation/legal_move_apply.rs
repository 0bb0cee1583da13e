//! Move application by copy.
//!
//! `apply_move` never mutates its input. It clones the state, relocates the
//! moving piece, removes any captured enemy piece, swaps the used card with
//! the stored card, and hands the turn to the other color.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::onitama_types::*;

pub fn apply_move(game_state: &GameState, mv: &Move) -> EngineResult<GameState> {
    let origin = mv.origin.ensure_on_board()?;
    let destination = mv.destination.ensure_on_board()?;

    let mover = game_state
        .piece_at(origin)
        .ok_or_else(|| illegal(mv, "no piece on origin square"))?;
    let color = mover.color;

    let card_index = usize::from(mv.card_index);
    let card = *game_state.hands[color.index()]
        .get(card_index)
        .ok_or_else(|| illegal(mv, "card index must be 0 or 1"))?;
    let (dx, dy) = card
        .oriented_offset(color, usize::from(mv.offset_index))
        .ok_or_else(|| illegal(mv, "offset index out of range for card"))?;
    if origin.offset_by(dx, dy) != Some(destination) {
        return Err(illegal(mv, "destination does not follow from card offset"));
    }
    if game_state.occupancy(color) & destination.bit() != 0 {
        return Err(illegal(mv, "destination holds a piece of the moving color"));
    }

    let mut next = game_state.clone();
    let enemy = color.opposite();

    // Capture.
    if next.masters[enemy.index()] == Some(destination) {
        next.masters[enemy.index()] = None;
    }
    next.pawns[enemy.index()].retain(|&square| square != destination);

    // Relocate.
    match mover.kind {
        PieceKind::Master => next.masters[color.index()] = Some(destination),
        PieceKind::Pawn => {
            if let Some(square) = next.pawns[color.index()]
                .iter_mut()
                .find(|square| **square == origin)
            {
                *square = destination;
            }
        }
    }

    // Used card goes to the middle, stored card takes its slot.
    next.hands[color.index()][card_index] = game_state.stored_card;
    next.stored_card = card;

    next.side_to_move = enemy;

    Ok(next)
}

fn illegal(mv: &Move, reason: &str) -> EngineError {
    EngineError::IllegalMove {
        origin: mv.origin,
        destination: mv.destination,
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::move_generator::generate_legal_moves;

    fn state(notation: &str) -> GameState {
        GameState::from_notation(notation).expect("test position should parse")
    }

    #[test]
    fn card_swap_round_trip() {
        let before = GameState::new_standard_game().expect("standard game");
        for mv in generate_legal_moves(&before, PieceColor::Red) {
            let after = apply_move(&before, &mv).expect("generated move should apply");
            let slot = usize::from(mv.card_index);
            let used = before.hands[PieceColor::Red.index()][slot];

            assert_eq!(after.hands[PieceColor::Red.index()][slot], before.stored_card);
            assert_eq!(after.stored_card, used);
            assert_eq!(
                after.hands[PieceColor::Red.index()][1 - slot],
                before.hands[PieceColor::Red.index()][1 - slot]
            );
            assert_eq!(after.cards(PieceColor::Blue), before.cards(PieceColor::Blue));
            assert_eq!(after.side_to_move, PieceColor::Blue);
            assert!(after.validate().is_ok());
        }
    }

    #[test]
    fn parent_state_is_untouched() {
        let before = GameState::new_standard_game().expect("standard game");
        let snapshot = before.clone();
        let mv = generate_legal_moves(&before, PieceColor::Red)[0];
        let _ = apply_move(&before, &mv).expect("generated move should apply");
        assert_eq!(before, snapshot);
    }

    #[test]
    fn capturing_the_master_removes_it() {
        let s = state("2m2/2P2/5/5/2M2 boar,ox frog,rabbit crab r");
        let mv = Move {
            origin: Coordinate { x: 2, y: 1 },
            destination: BLUE_TEMPLE,
            card_index: 0,
            offset_index: 0,
        };
        let next = apply_move(&s, &mv).expect("capture should apply");
        assert_eq!(next.masters[PieceColor::Blue.index()], None);
        assert_eq!(next.pawns[PieceColor::Red.index()], vec![BLUE_TEMPLE]);
        assert_eq!(next.stored_card, Card::Boar);
        assert_eq!(next.cards(PieceColor::Red), [Card::Crab, Card::Ox]);
    }

    #[test]
    fn capturing_a_pawn_shrinks_the_pawn_set() {
        let s = state("m4/5/2p2/2P2/2M2 boar,ox frog,rabbit crab r");
        let mv = Move {
            origin: Coordinate { x: 2, y: 3 },
            destination: Coordinate { x: 2, y: 2 },
            card_index: 1,
            offset_index: 0,
        };
        let next = apply_move(&s, &mv).expect("capture should apply");
        assert_eq!(next.pawn_count(PieceColor::Blue), 0);
        assert_eq!(next.pawns[PieceColor::Red.index()], vec![Coordinate { x: 2, y: 2 }]);
    }

    #[test]
    fn blue_moves_flip_the_turn_back_to_red() {
        let s = GameState::new_standard_game().expect("standard game");
        let mv = generate_legal_moves(&s, PieceColor::Blue)[0];
        let next = apply_move(&s, &mv).expect("blue move should apply");
        assert_eq!(next.side_to_move, PieceColor::Red);
        assert_eq!(next.stored_card, s.cards(PieceColor::Blue)[usize::from(mv.card_index)]);
    }

    #[test]
    fn empty_origin_is_illegal() {
        let s = GameState::new_standard_game().expect("standard game");
        let mv = Move {
            origin: Coordinate { x: 2, y: 2 },
            destination: Coordinate { x: 2, y: 1 },
            card_index: 0,
            offset_index: 0,
        };
        assert!(matches!(apply_move(&s, &mv), Err(EngineError::IllegalMove { .. })));
    }

    #[test]
    fn friendly_destination_is_illegal() {
        // Crab's (-2,0) from the red master lands on red's own pawn.
        let s = GameState::new_standard_game().expect("standard game");
        let mv = Move {
            origin: RED_TEMPLE,
            destination: Coordinate { x: 0, y: 4 },
            card_index: 1,
            offset_index: 1,
        };
        assert!(matches!(apply_move(&s, &mv), Err(EngineError::IllegalMove { .. })));
    }

    #[test]
    fn destination_must_match_the_card() {
        let s = GameState::new_standard_game().expect("standard game");
        let mv = Move {
            origin: RED_TEMPLE,
            destination: Coordinate { x: 2, y: 1 },
            card_index: 0,
            offset_index: 0,
        };
        assert!(matches!(apply_move(&s, &mv), Err(EngineError::IllegalMove { .. })));
    }

    #[test]
    fn off_board_destination_is_a_bounds_error() {
        let s = GameState::new_standard_game().expect("standard game");
        let mv = Move {
            origin: RED_TEMPLE,
            destination: Coordinate { x: 2, y: 5 },
            card_index: 0,
            offset_index: 1,
        };
        assert_eq!(
            apply_move(&s, &mv),
            Err(EngineError::OutOfBounds { x: 2, y: 5 })
        );
    }
}
