//! Fixed-depth alpha-beta engine.
//!
//! Searches from the side to move with the positional scorer. With more than
//! one thread configured, the root children are split across scoped workers.

use std::time::Instant;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::EngineResult;
use crate::game_state::onitama_types::GameState;
use crate::move_generation::move_generator::LegalMoveGenerator;
use crate::search::alpha_beta::{alpha_beta_search, SearchConfig, WinScoring};
use crate::search::board_scoring::{EvaluationWeights, PositionalScorer};
use crate::search::threading::{parallel_root_search, ThreadingConfig};

pub struct MinimaxEngine {
    default_depth: u8,
    win_scoring: WinScoring,
    scorer: PositionalScorer,
    threading: ThreadingConfig,
}

impl MinimaxEngine {
    pub fn new(default_depth: u8) -> Self {
        Self {
            default_depth,
            win_scoring: WinScoring::default(),
            scorer: PositionalScorer::default(),
            threading: ThreadingConfig::default(),
        }
    }

    pub fn with_win_scoring(mut self, win_scoring: WinScoring) -> Self {
        self.win_scoring = win_scoring;
        self
    }

    pub fn with_weights(mut self, weights: EvaluationWeights) -> Self {
        self.scorer = PositionalScorer::new(weights);
        self
    }

    pub fn with_threads(mut self, requested_threads: usize) -> Self {
        self.threading = ThreadingConfig { requested_threads };
        self
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default().max_ply)
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Onitama Minimax"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let config = SearchConfig {
            max_ply: params.depth.unwrap_or(self.default_depth).max(1),
            win_scoring: self.win_scoring,
        };
        let mover = game_state.side_to_move;
        let started = Instant::now();

        let result = if self.threading.is_parallel() {
            parallel_root_search(
                game_state,
                mover,
                &LegalMoveGenerator,
                &self.scorer,
                config,
                self.threading,
            )?
        } else {
            alpha_beta_search(game_state, mover, &LegalMoveGenerator, &self.scorer, config)?
        };

        let elapsed_ms = started.elapsed().as_millis();
        let mut out = EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} cutoffs {} time {}",
            config.max_ply, result.best_score, result.nodes, result.cutoffs, elapsed_ms
        ));
        if self.threading.is_parallel() {
            out.info_lines.push(format!(
                "info string minimax_engine threads {}",
                self.threading.normalized_threads()
            ));
        }
        if let Some(mv) = result.best_move {
            out.info_lines.push(format!("info string minimax_engine best {mv}"));
        }
        Ok(out)
    }
}
