//! Terminal board renderer.
//!
//! Row `y = 0` (BLUE's home row) is printed at the top, so RED plays upward.
//! Temples with no piece on them are drawn as `+`.

use crate::game_state::onitama_types::*;

pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  0 1 2 3 4\n");

    for y in 0..BOARD_SIZE {
        out.push(char::from(b'0' + y));
        out.push(' ');

        for x in 0..BOARD_SIZE {
            let square = Coordinate { x, y };
            let ch = match game_state.piece_at(square) {
                Some(piece) => piece_to_symbol(piece),
                None if square == RED_TEMPLE || square == BLUE_TEMPLE => '+',
                None => '·',
            };
            out.push(ch);

            if x + 1 < BOARD_SIZE {
                out.push(' ');
            }
        }

        out.push('\n');
    }

    let red = game_state.cards(PieceColor::Red);
    let blue = game_state.cards(PieceColor::Blue);
    out.push_str(&format!(
        "red: {} {} | blue: {} {} | stored: {} | to move: {}",
        red[0], red[1], blue[0], blue[1], game_state.stored_card, game_state.side_to_move
    ));

    out
}

fn piece_to_symbol(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (PieceColor::Red, PieceKind::Master) => 'R',
        (PieceColor::Red, PieceKind::Pawn) => 'r',
        (PieceColor::Blue, PieceKind::Master) => 'B',
        (PieceColor::Blue, PieceKind::Pawn) => 'b',
    }
}
