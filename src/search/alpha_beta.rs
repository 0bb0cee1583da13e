//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The maximizing color is fixed for the whole search; the color to move
//! alternates per ply starting with the maximizing color at the root. Every
//! node checks for a decided game before anything else, so a proven win or
//! loss always overrides the depth limit and the static evaluator.

use tracing::{debug, trace};

use crate::errors::EngineResult;
use crate::game_state::onitama_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{game_result, GameResult};
use crate::move_generation::move_generator::{LegalMoveGenerator, MoveGenerator};
use crate::search::board_scoring::{BoardScorer, PositionalScorer};

/// Base score of a proven win under [`WinScoring::DepthAdjusted`].
pub const WIN_SCORE: f64 = 1_000_000.0;

/// Score given to a node whose mover has no legal move.
pub const NO_MOVES_SCORE: f64 = 0.0;

/// How decided positions are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinScoring {
    /// Wins are `+inf`, losses `-inf`; ties between wins resolve to the first
    /// move in generation order.
    #[default]
    Infinite,
    /// A win found `d` plies below the root scores `WIN_SCORE - d` and a loss
    /// `-(WIN_SCORE - d)`, preferring the quickest win and the slowest loss.
    DepthAdjusted,
}

impl WinScoring {
    #[inline]
    pub fn win(self, depth: u8) -> f64 {
        match self {
            WinScoring::Infinite => f64::INFINITY,
            WinScoring::DepthAdjusted => WIN_SCORE - f64::from(depth),
        }
    }

    #[inline]
    pub fn loss(self, depth: u8) -> f64 {
        -self.win(depth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_ply: u8,
    pub win_scoring: WinScoring,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_ply: 3,
            win_scoring: WinScoring::Infinite,
        }
    }
}

impl SearchConfig {
    pub fn with_max_ply(max_ply: u8) -> Self {
        Self {
            max_ply,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Root move leading to the backed-up score. `None` when the root is
    /// decided, sits at the horizon, or has no legal move.
    pub best_move: Option<Move>,
    pub best_score: f64,
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Result of [`evaluate`]: the move to play and its backed-up score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveEvaluation {
    pub mv: Option<Move>,
    pub score: f64,
}

/// Best move for `maximizing` searched `max_ply` plies deep, using the legal
/// move generator and the default positional scorer.
pub fn evaluate(
    board: &GameState,
    maximizing: PieceColor,
    max_ply: u8,
) -> EngineResult<MoveEvaluation> {
    let result = alpha_beta_search(
        board,
        maximizing,
        &LegalMoveGenerator,
        &PositionalScorer::default(),
        SearchConfig::with_max_ply(max_ply),
    )?;
    Ok(MoveEvaluation {
        mv: result.best_move,
        score: result.best_score,
    })
}

pub fn alpha_beta_search<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    maximizing: PieceColor,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> EngineResult<SearchResult> {
    game_state.validate()?;

    let mut searcher = AlphaBeta {
        generator,
        scorer,
        maximizing,
        config,
        nodes: 0,
        cutoffs: 0,
    };
    let (best_score, best_move) = searcher.search_node(
        game_state,
        0,
        maximizing,
        f64::NEG_INFINITY,
        f64::INFINITY,
    )?;

    debug!(
        %maximizing,
        max_ply = config.max_ply,
        nodes = searcher.nodes,
        cutoffs = searcher.cutoffs,
        score = best_score,
        best_move = ?best_move,
        "alpha-beta search finished"
    );

    Ok(SearchResult {
        best_move,
        best_score,
        nodes: searcher.nodes,
        cutoffs: searcher.cutoffs,
    })
}

/// Search `game_state` as a node `depth` plies below some root, with `color`
/// to move. Shared with the root-parallel driver, which starts its workers
/// one ply down.
pub(crate) fn search_subtree<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    maximizing: PieceColor,
    color: PieceColor,
    depth: u8,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> EngineResult<(f64, u64, u64)> {
    let mut searcher = AlphaBeta {
        generator,
        scorer,
        maximizing,
        config,
        nodes: 0,
        cutoffs: 0,
    };
    let (score, _) = searcher.search_node(
        game_state,
        depth,
        color,
        f64::NEG_INFINITY,
        f64::INFINITY,
    )?;
    Ok((score, searcher.nodes, searcher.cutoffs))
}

struct AlphaBeta<'a, G, S> {
    generator: &'a G,
    scorer: &'a S,
    maximizing: PieceColor,
    config: SearchConfig,
    nodes: u64,
    cutoffs: u64,
}

impl<G: MoveGenerator, S: BoardScorer> AlphaBeta<'_, G, S> {
    /// Returns the node's score and the move taken from this node that
    /// produced it.
    fn search_node(
        &mut self,
        game_state: &GameState,
        depth: u8,
        color: PieceColor,
        mut alpha: f64,
        mut beta: f64,
    ) -> EngineResult<(f64, Option<Move>)> {
        self.nodes += 1;

        match game_result(game_state, self.maximizing) {
            GameResult::Win(winner) if winner == self.maximizing => {
                return Ok((self.config.win_scoring.win(depth), None));
            }
            GameResult::Win(_) => return Ok((self.config.win_scoring.loss(depth), None)),
            GameResult::InProgress => {}
        }

        if depth >= self.config.max_ply {
            return Ok((self.scorer.score(game_state, self.maximizing), None));
        }

        let moves = self.generator.generate_moves(game_state, color);
        if moves.is_empty() {
            trace!(depth, %color, "no legal moves");
            return Ok((NO_MOVES_SCORE, None));
        }

        let maximizing_node = color == self.maximizing;
        let mut best: Option<(f64, Move)> = None;

        for (i, mv) in moves.iter().enumerate() {
            let child = apply_move(game_state, mv)?;
            let (score, _) = self.search_node(&child, depth + 1, color.opposite(), alpha, beta)?;

            let improves = match best {
                None => true,
                Some((best_score, _)) if maximizing_node => score > best_score,
                Some((best_score, _)) => score < best_score,
            };
            if improves {
                best = Some((score, *mv));
            }

            if maximizing_node {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if alpha >= beta {
                self.cutoffs += 1;
                trace!(depth, skipped = moves.len() - i - 1, alpha, beta, "prune");
                break;
            }
        }

        Ok(match best {
            Some((score, mv)) => (score, Some(mv)),
            None => (NO_MOVES_SCORE, None),
        })
    }
}
