//! Pluggable static evaluation.
//!
//! Search delegates horizon scoring to `BoardScorer` so heuristics can be
//! swapped without touching the search code. Scores are always taken from a
//! fixed perspective color, are finite, and grow as the position improves for
//! that color.

use crate::game_state::onitama_types::*;
use crate::move_generation::legal_move_checks::reach_squares;

/// Largest Chebyshev distance between two squares on the board.
const MAX_DISTANCE: f64 = (BOARD_SIZE - 1) as f64;

pub trait BoardScorer: Send + Sync {
    /// Score of a non-terminal position from `perspective`'s point of view.
    fn score(&self, game_state: &GameState, perspective: PieceColor) -> f64;
}

/// Pawn-count differential only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, perspective: PieceColor) -> f64 {
        let own = game_state.pawn_count(perspective) as f64;
        let theirs = game_state.pawn_count(perspective.opposite()) as f64;
        own - theirs
    }
}

/// Weights of [`PositionalScorer`]. Only the signs are fixed; magnitudes are
/// tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationWeights {
    /// Per pawn of advantage.
    pub material: f64,
    /// Per step the master is closer to the enemy temple than the far corner.
    pub master_advance: f64,
    /// Per reachable empty square.
    pub empty_reach: f64,
    /// Per reachable square held by a friendly piece.
    pub support: f64,
    /// Per reachable enemy pawn.
    pub threat: f64,
    /// Per way to reach the enemy master.
    pub master_threat: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            material: 10.0,
            master_advance: 2.0,
            empty_reach: 0.1,
            support: 0.25,
            threat: 0.5,
            master_threat: 1.5,
        }
    }
}

/// Material, master advance toward the enemy temple, and card reach
/// (mobility, support and threats), each mirrored for the opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer {
    pub weights: EvaluationWeights,
}

impl PositionalScorer {
    pub const fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    /// Everything `color` has going for it, before subtracting the opponent.
    fn side_score(&self, game_state: &GameState, color: PieceColor) -> f64 {
        let w = &self.weights;
        let enemy = color.opposite();

        let mut total = game_state.pawn_count(color) as f64 * w.material;

        if let Some(master) = game_state.masters[color.index()] {
            let distance = f64::from(master.chebyshev_distance(enemy.temple()));
            total += (MAX_DISTANCE - distance) * w.master_advance;
        }

        let own_occ = game_state.occupancy(color);
        let enemy_occ = game_state.occupancy(enemy);
        let enemy_master = game_state.masters[enemy.index()].map(Coordinate::bit).unwrap_or(0);

        for (_, to) in reach_squares(game_state, color) {
            let bit = to.bit();
            total += if bit & enemy_master != 0 {
                w.master_threat
            } else if bit & enemy_occ != 0 {
                w.threat
            } else if bit & own_occ != 0 {
                w.support
            } else {
                w.empty_reach
            };
        }

        total
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &GameState, perspective: PieceColor) -> f64 {
        self.side_score(game_state, perspective)
            - self.side_score(game_state, perspective.opposite())
    }
}
