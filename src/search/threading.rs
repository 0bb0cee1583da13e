//! Root-split parallel search.
//!
//! Each immediate child of the root is searched on its own scoped thread with
//! a full `(-inf, +inf)` window. No bounds cross between branches, so the
//! result matches the sequential search; only the pruning inside each branch
//! is lost. Child scores are reduced in move-generation order, which keeps the
//! first-encountered tie-break.

use std::thread;

use tracing::debug;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::onitama_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{game_result, GameResult};
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::alpha_beta::{search_subtree, SearchConfig, SearchResult, NO_MOVES_SCORE};
use crate::search::board_scoring::BoardScorer;

/// Worker count configuration owned by an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub requested_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            requested_threads: 1,
        }
    }
}

impl ThreadingConfig {
    #[inline]
    pub fn normalized_threads(self) -> usize {
        self.requested_threads.max(1)
    }

    #[inline]
    pub fn is_parallel(self) -> bool {
        self.normalized_threads() > 1
    }
}

pub fn parallel_root_search<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    maximizing: PieceColor,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
    threading: ThreadingConfig,
) -> EngineResult<SearchResult> {
    game_state.validate()?;

    let root = |score: f64| SearchResult {
        best_move: None,
        best_score: score,
        nodes: 1,
        cutoffs: 0,
    };

    match game_result(game_state, maximizing) {
        GameResult::Win(winner) if winner == maximizing => {
            return Ok(root(config.win_scoring.win(0)))
        }
        GameResult::Win(_) => return Ok(root(config.win_scoring.loss(0))),
        GameResult::InProgress => {}
    }
    if config.max_ply == 0 {
        return Ok(root(scorer.score(game_state, maximizing)));
    }

    let moves = generator.generate_moves(game_state, maximizing);
    if moves.is_empty() {
        return Ok(root(NO_MOVES_SCORE));
    }

    let children = moves
        .iter()
        .map(|mv| apply_move(game_state, mv))
        .collect::<EngineResult<Vec<_>>>()?;

    let workers = threading.normalized_threads().min(children.len());
    let chunk_len = children.len().div_ceil(workers);

    let outcomes: Vec<EngineResult<Vec<(f64, u64, u64)>>> = thread::scope(|scope| {
        let handles: Vec<_> = children
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|child| {
                            search_subtree(
                                child,
                                maximizing,
                                maximizing.opposite(),
                                1,
                                generator,
                                scorer,
                                config,
                            )
                        })
                        .collect::<EngineResult<Vec<_>>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    Err(EngineError::Engine("root search worker panicked".to_owned()))
                })
            })
            .collect()
    });

    let mut result = SearchResult {
        best_move: None,
        best_score: f64::NEG_INFINITY,
        nodes: 1,
        cutoffs: 0,
    };

    let mut scores = moves.iter();
    for outcome in outcomes {
        for (score, nodes, cutoffs) in outcome? {
            let Some(mv) = scores.next() else {
                break;
            };
            result.nodes += nodes;
            result.cutoffs += cutoffs;
            if result.best_move.is_none() || score > result.best_score {
                result.best_score = score;
                result.best_move = Some(*mv);
            }
        }
    }

    debug!(
        %maximizing,
        workers,
        nodes = result.nodes,
        score = result.best_score,
        "root-parallel search finished"
    );

    Ok(result)
}
