//! Win detection and card-reach queries.

use crate::game_state::onitama_types::*;

/// Outcome of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Win(PieceColor),
}

/// Decide whether the game is over, checking from `perspective`'s side.
///
/// Rules apply in a fixed order and the first match wins: opponent master
/// captured, own master captured, own master on the opponent's temple,
/// opponent master on our temple.
pub fn game_result(game_state: &GameState, perspective: PieceColor) -> GameResult {
    let opponent = perspective.opposite();
    let own_master = game_state.masters[perspective.index()];
    let opponent_master = game_state.masters[opponent.index()];

    match (own_master, opponent_master) {
        (_, None) => GameResult::Win(perspective),
        (None, Some(_)) => GameResult::Win(opponent),
        (Some(own), _) if own == opponent.temple() => GameResult::Win(perspective),
        (_, Some(theirs)) if theirs == perspective.temple() => GameResult::Win(opponent),
        _ => GameResult::InProgress,
    }
}

/// Winner of the position, if any, as seen from the side to move.
#[inline]
pub fn winner(game_state: &GameState) -> Option<PieceColor> {
    match game_result(game_state, game_state.side_to_move) {
        GameResult::Win(color) => Some(color),
        GameResult::InProgress => None,
    }
}

/// Every on-board square `color` reaches with its held cards, one item per
/// piece x card x offset, ignoring what occupies the square. A square reached
/// in several ways is yielded several times.
pub fn reach_squares(
    game_state: &GameState,
    color: PieceColor,
) -> impl Iterator<Item = (Piece, Coordinate)> + '_ {
    let cards = game_state.cards(color);
    game_state.pieces(color).flat_map(move |piece| {
        cards.into_iter().flat_map(move |card| {
            (0..card.offsets().len()).filter_map(move |offset_index| {
                let (dx, dy) = card.oriented_offset(color, offset_index)?;
                let to = piece.position.offset_by(dx, dy)?;
                Some((piece, to))
            })
        })
    })
}
