//! Plain minimax without pruning.
//!
//! Visits every node up to the horizon. It exists as the reference the pruned
//! search is checked against and as a baseline for node counts.

use crate::errors::EngineResult;
use crate::game_state::onitama_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{game_result, GameResult};
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::alpha_beta::{SearchConfig, SearchResult, NO_MOVES_SCORE};
use crate::search::board_scoring::BoardScorer;

pub fn minimax_search<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    maximizing: PieceColor,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> EngineResult<SearchResult> {
    game_state.validate()?;

    let mut nodes = 0u64;
    let (best_score, best_move) = minimax(
        game_state, maximizing, maximizing, 0, generator, scorer, config, &mut nodes,
    )?;

    Ok(SearchResult {
        best_move,
        best_score,
        nodes,
        cutoffs: 0,
    })
}

#[allow(clippy::too_many_arguments)]
fn minimax<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    maximizing: PieceColor,
    color: PieceColor,
    depth: u8,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
    nodes: &mut u64,
) -> EngineResult<(f64, Option<Move>)> {
    *nodes += 1;

    match game_result(game_state, maximizing) {
        GameResult::Win(winner) if winner == maximizing => {
            return Ok((config.win_scoring.win(depth), None))
        }
        GameResult::Win(_) => return Ok((config.win_scoring.loss(depth), None)),
        GameResult::InProgress => {}
    }

    if depth >= config.max_ply {
        return Ok((scorer.score(game_state, maximizing), None));
    }

    let moves = generator.generate_moves(game_state, color);
    let mut best: Option<(f64, Move)> = None;

    for mv in moves {
        let child = apply_move(game_state, &mv)?;
        let (score, _) = minimax(
            &child,
            maximizing,
            color.opposite(),
            depth + 1,
            generator,
            scorer,
            config,
            nodes,
        )?;

        let improves = match best {
            None => true,
            Some((best_score, _)) if color == maximizing => score > best_score,
            Some((best_score, _)) => score < best_score,
        };
        if improves {
            best = Some((score, mv));
        }
    }

    Ok(match best {
        Some((score, mv)) => (score, Some(mv)),
        None => (NO_MOVES_SCORE, None),
    })
}
