//! Position-notation parser.
//!
//! Notation has five whitespace-separated fields:
//!
//! ```text
//! <board> <red cards> <blue cards> <stored card> <side to move>
//! ppmpp/5/5/5/PPMPP tiger,crab frog,rabbit eel r
//! ```
//!
//! The board lists rows `y = 0` through `y = 4` separated by `/`, columns
//! `x = 0..5` left to right. Uppercase letters are RED, lowercase BLUE; `m`
//! is a master and `p` a pawn; digits `1`-`5` skip empty squares.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::onitama_types::*;

pub fn parse_position(notation: &str) -> EngineResult<GameState> {
    let mut parts = notation.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board field"))?;
    let red_part = parts.next().ok_or_else(|| invalid("missing red cards"))?;
    let blue_part = parts.next().ok_or_else(|| invalid("missing blue cards"))?;
    let stored_part = parts.next().ok_or_else(|| invalid("missing stored card"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let (masters, pawns) = parse_board(board_part)?;
    let red_cards = parse_hand(red_part)?;
    let blue_cards = parse_hand(blue_part)?;
    let stored_card = Card::from_name(stored_part)?;
    let side_to_move = parse_side_to_move(side_part)?;

    GameState::from_parts(
        masters,
        pawns,
        [red_cards, blue_cards],
        stored_card,
        side_to_move,
    )
}

fn parse_board(board_part: &str) -> EngineResult<([Option<Coordinate>; 2], [Vec<Coordinate>; 2])> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != usize::from(BOARD_SIZE) {
        return Err(invalid("board must contain 5 rows"));
    }

    let mut masters = [None; 2];
    let mut pawns = [Vec::new(), Vec::new()];

    for (y, row) in rows.iter().enumerate() {
        let mut x = 0u8;

        for ch in row.chars() {
            if let Some(empty) = ch.to_digit(10) {
                if !(1..=u32::from(BOARD_SIZE)).contains(&empty) {
                    return Err(invalid(&format!("invalid empty-square count '{ch}'")));
                }
                if u32::from(x) + empty > u32::from(BOARD_SIZE) {
                    return Err(invalid(&format!("row {y} has too many columns")));
                }
                x += empty as u8;
                continue;
            }

            let (color, kind) = piece_from_char(ch)
                .ok_or_else(|| invalid(&format!("invalid piece character '{ch}'")))?;
            if x >= BOARD_SIZE {
                return Err(invalid(&format!("row {y} has too many columns")));
            }

            let square = Coordinate { x, y: y as u8 };
            match kind {
                PieceKind::Master => {
                    if masters[color.index()].replace(square).is_some() {
                        return Err(EngineError::InvariantViolation(format!(
                            "{color} has more than one master"
                        )));
                    }
                }
                PieceKind::Pawn => pawns[color.index()].push(square),
            }
            x += 1;
        }

        if x != BOARD_SIZE {
            return Err(invalid(&format!("row {y} does not sum to 5 columns")));
        }
    }

    Ok((masters, pawns))
}

fn parse_hand(hand_part: &str) -> EngineResult<[Card; 2]> {
    let mut names = hand_part.split(',');
    let first = names.next().ok_or_else(|| invalid("hand needs two cards"))?;
    let second = names.next().ok_or_else(|| invalid("hand needs two cards"))?;
    if names.next().is_some() {
        return Err(invalid("hand holds exactly two cards"));
    }
    Ok([Card::from_name(first)?, Card::from_name(second)?])
}

fn parse_side_to_move(side_part: &str) -> EngineResult<PieceColor> {
    match side_part {
        "r" => Ok(PieceColor::Red),
        "b" => Ok(PieceColor::Blue),
        _ => Err(invalid(&format!("invalid side to move '{side_part}'"))),
    }
}

fn piece_from_char(ch: char) -> Option<(PieceColor, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        PieceColor::Red
    } else {
        PieceColor::Blue
    };
    let kind = match ch.to_ascii_lowercase() {
        'm' => PieceKind::Master,
        'p' => PieceKind::Pawn,
        _ => return None,
    };
    Some((color, kind))
}

fn invalid(msg: &str) -> EngineError {
    EngineError::InvalidNotation(msg.to_owned())
}

#[cfg(test)]
mod tests {
    use super::parse_position;
    use crate::errors::EngineError;
    use crate::game_state::onitama_rules::STARTING_BOARD;
    use crate::game_state::onitama_types::*;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_position_and_render_board() {
        let notation = format!("{STARTING_BOARD} tiger,crab frog,rabbit eel r");
        let state = parse_position(&notation).expect("starting position should parse");

        println!("\n{}", render_game_state(&state));

        assert_eq!(state, GameState::new_standard_game().expect("standard game"));
    }

    #[test]
    fn missing_masters_are_allowed() {
        let state = parse_position("p4/5/5/5/P4 tiger,crab frog,rabbit eel b")
            .expect("captured masters are a legal board");
        assert_eq!(state.masters, [None, None]);
        assert_eq!(state.side_to_move, PieceColor::Blue);
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let overlong_row = format!(
            "{}/5/5/5/2M2 tiger,crab frog,rabbit eel r",
            "5".repeat(257)
        );
        let cases = [
            overlong_row.as_str(),
            "ppmpp/5/5/33/PPMPP tiger,crab frog,rabbit eel r",
            "ppmpp/5/5/5 tiger,crab frog,rabbit eel r",
            "ppmpp/5/5/5/PPMPPP tiger,crab frog,rabbit eel r",
            "ppmpp/5/5/5/PPMPx tiger,crab frog,rabbit eel r",
            "ppmpp/5/5/5/PPMPP tiger frog,rabbit eel r",
            "ppmpp/5/5/5/PPMPP tiger,crab frog,rabbit eel w",
            "ppmpp/5/5/5/PPMPP tiger,crab frog,rabbit eel r extra",
            "ppmpp/5/5/5/PPMPP tiger,crab frog,rabbit",
        ];
        for notation in cases {
            assert!(
                matches!(parse_position(notation), Err(EngineError::InvalidNotation(_))),
                "expected notation error for {notation}"
            );
        }
    }

    #[test]
    fn unknown_card_and_second_master_are_rejected() {
        assert_eq!(
            parse_position("ppmpp/5/5/5/PPMPP tiger,qilin frog,rabbit eel r"),
            Err(EngineError::UnknownCard("qilin".to_owned()))
        );
        assert!(matches!(
            parse_position("ppmpp/5/5/M4/PPMPP tiger,crab frog,rabbit eel r"),
            Err(EngineError::InvariantViolation(_))
        ));
        assert!(matches!(
            parse_position("ppmpp/5/5/5/PPMPP tiger,crab tiger,rabbit eel r"),
            Err(EngineError::InvariantViolation(_))
        ));
    }
}
