//! One-ply greedy engine: a winning move if there is one, otherwise a
//! capture, otherwise anything. Ties are broken at random.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::onitama_types::{GameState, Move, PieceColor};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{game_result, GameResult};
use crate::move_generation::move_generator::{LegalMoveGenerator, MoveGenerator};

pub struct GreedyEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn move_value(game_state: &GameState, mover: PieceColor, mv: &Move) -> EngineResult<i32> {
        let child = apply_move(game_state, mv)?;
        if game_result(&child, mover) == GameResult::Win(mover) {
            return Ok(2);
        }
        let captures = game_state
            .piece_at(mv.destination)
            .is_some_and(|p| p.color != mover);
        Ok(i32::from(captures))
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "Onitama Greedy"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        game_state.validate()?;
        let mover = game_state.side_to_move;
        let legal_moves = self.move_generator.generate_moves(game_state, mover);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string greedy_engine legal_moves {}",
            legal_moves.len()
        ));

        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string greedy_engine requested_depth {}", depth));
        }

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();

        for mv in &legal_moves {
            let value = Self::move_value(game_state, mover, mv)?;
            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(*mv);
            } else if value == best_value {
                best_moves.push(*mv);
            }
        }

        let picked = best_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or_else(|| EngineError::Engine("failed to choose greedy best move".to_owned()))?;

        out.info_lines.push(format!(
            "info string greedy_engine move_value {}",
            best_value
        ));
        out.best_move = Some(*picked);
        out.score = Some(f64::from(best_value));
        Ok(out)
    }
}
