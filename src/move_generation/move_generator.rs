//! Legal move generation.
//!
//! Candidates are filtered with plain predicates (on board, not onto a
//! friendly piece) before a `Move` is ever built. Output order is piece order
//! (master, then pawns) x card index x offset index, which search relies on
//! for reproducible tie-breaking.

use crate::game_state::onitama_types::*;

pub trait MoveGenerator: Send + Sync {
    /// Legal moves for `color` in `game_state`, in generation order.
    fn generate_moves(&self, game_state: &GameState, color: PieceColor) -> Vec<Move>;
}

/// Generator that follows the card rules exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState, color: PieceColor) -> Vec<Move> {
        let mut out = Vec::with_capacity(24);
        generate_legal_moves_into(game_state, color, &mut out);
        out
    }
}

#[inline]
pub fn generate_legal_moves(game_state: &GameState, color: PieceColor) -> Vec<Move> {
    LegalMoveGenerator.generate_moves(game_state, color)
}

/// Append the legal moves of `color` to `out`.
pub fn generate_legal_moves_into(game_state: &GameState, color: PieceColor, out: &mut Vec<Move>) {
    debug_assert!(
        game_state.validate().is_ok(),
        "move generation on a malformed position: {:?}",
        game_state.validate()
    );

    let own_occ = game_state.occupancy(color);
    let cards = game_state.cards(color);

    for piece in game_state.pieces(color) {
        for (card_index, card) in cards.iter().enumerate() {
            for offset_index in 0..card.offsets().len() {
                let Some((dx, dy)) = card.oriented_offset(color, offset_index) else {
                    continue;
                };
                let Some(destination) = piece.position.offset_by(dx, dy) else {
                    continue;
                };
                if own_occ & destination.bit() != 0 {
                    continue;
                }
                out.push(Move {
                    origin: piece.position,
                    destination,
                    card_index: card_index as u8,
                    offset_index: offset_index as u8,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::apply_move;

    fn state(notation: &str) -> GameState {
        GameState::from_notation(notation).expect("test position should parse")
    }

    #[test]
    fn opening_moves_for_red_with_tiger_and_crab() {
        let s = GameState::new_standard_game().expect("standard game");
        let moves = generate_legal_moves(&s, PieceColor::Red);

        // Tiger jumps two rows forward, crab steps one; sideways crab moves
        // and tiger's back step are blocked or off the board.
        assert_eq!(moves.len(), 10);
        assert!(moves.iter().all(|m| m.destination.y == 2 || m.destination.y == 3));

        let first = moves[0];
        assert_eq!(first.origin, RED_TEMPLE);
        assert_eq!(first.destination, Coordinate { x: 2, y: 2 });
        assert_eq!((first.card_index, first.offset_index), (0, 0));
    }

    #[test]
    fn blue_offsets_are_mirrored() {
        let s = GameState::new_standard_game().expect("standard game");
        let moves = generate_legal_moves(&s, PieceColor::Blue);

        // Frog as blue: (1,1) only; rabbit as blue: (-1,1) only.
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.destination.y == 1));
        let master_moves: Vec<_> = moves.iter().filter(|m| m.origin == BLUE_TEMPLE).collect();
        assert_eq!(master_moves.len(), 2);
        assert_eq!(master_moves[0].destination, Coordinate { x: 3, y: 1 });
        assert_eq!(master_moves[1].destination, Coordinate { x: 1, y: 1 });
    }

    #[test]
    fn order_is_piece_then_card_then_offset() {
        let s = state("m4/5/2M2/5/4P boar,ox frog,rabbit crab r");
        let moves = generate_legal_moves(&s, PieceColor::Red);
        let keys: Vec<(Coordinate, u8, u8)> = moves
            .iter()
            .map(|m| (m.origin, m.card_index, m.offset_index))
            .collect();
        let mut sorted = keys.clone();
        let master = Coordinate { x: 2, y: 2 };
        sorted.sort_by_key(|(origin, card, offset)| (*origin != master, *card, *offset));
        assert_eq!(keys, sorted);
        assert_eq!(moves[0].origin, master);
    }

    #[test]
    fn captures_enemy_pieces_but_never_friendly_ones() {
        let s = state("2m2/2P2/5/5/2M2 boar,ox frog,rabbit crab r");
        let moves = generate_legal_moves(&s, PieceColor::Red);
        assert!(moves
            .iter()
            .any(|m| m.origin == Coordinate { x: 2, y: 1 } && m.destination == BLUE_TEMPLE));

        let own = s.occupancy(PieceColor::Red);
        assert!(moves.iter().all(|m| own & m.destination.bit() == 0));
    }

    #[test]
    fn walled_in_side_has_no_moves() {
        let s = state("M3m/P4/P4/P4/P4 tiger,horse ox,crane boar r");
        assert!(generate_legal_moves(&s, PieceColor::Red).is_empty());
        assert!(!generate_legal_moves(&s, PieceColor::Blue).is_empty());
    }

    #[test]
    fn generated_moves_stay_legal_along_random_lines() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut s = GameState::new_standard_game().expect("standard game");
            for _ in 0..30 {
                let color = s.side_to_move;
                let moves = generate_legal_moves(&s, color);
                let own = s.occupancy(color);
                for m in &moves {
                    assert!(m.destination.is_on_board());
                    assert_eq!(own & m.destination.bit(), 0, "self capture in {m}");
                }
                if moves.is_empty() || s.masters.iter().any(|m| m.is_none()) {
                    break;
                }
                let pick = moves[rng.random_range(0..moves.len())];
                s = apply_move(&s, &pick).expect("generated move should apply");
            }
        }
    }
}
