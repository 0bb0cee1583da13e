use crate::game_state::onitama_types::*;

/// Inverse of [`crate::utils::position_parser::parse_position`].
pub fn generate_position(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let red = game_state.cards(PieceColor::Red);
    let blue = game_state.cards(PieceColor::Blue);
    let side_to_move = match game_state.side_to_move {
        PieceColor::Red => "r",
        PieceColor::Blue => "b",
    };

    format!(
        "{} {},{} {},{} {} {}",
        board, red[0], red[1], blue[0], blue[1], game_state.stored_card, side_to_move
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for y in 0..BOARD_SIZE {
        let mut empty_count = 0u8;

        for x in 0..BOARD_SIZE {
            match game_state.piece_at(Coordinate { x, y }) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if y + 1 < BOARD_SIZE {
            out.push('/');
        }
    }

    out
}

fn piece_to_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Master => 'm',
        PieceKind::Pawn => 'p',
    };
    match piece.color {
        PieceColor::Red => base.to_ascii_uppercase(),
        PieceColor::Blue => base,
    }
}
