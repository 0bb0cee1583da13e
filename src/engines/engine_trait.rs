//! Engine abstraction layer.
//!
//! Defines common input parameters and output payloads so different move
//! choosers can be swapped at runtime behind a single trait interface.

use crate::errors::EngineResult;
use crate::game_state::onitama_types::{GameState, Move};

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Overrides the engine's configured search depth for this call.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// Backed-up score from the mover's perspective, when the engine computes one.
    pub score: Option<f64>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for `game_state.side_to_move`. `best_move` is `None` only
    /// when that side has no legal move.
    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> EngineResult<EngineOutput>;
}
