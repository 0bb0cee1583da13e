//! Errors used throughout the engine.
//!
//! `EngineError` is the single error type across the crate. Every variant is a
//! precondition failure: a malformed position handed in by a caller, a move
//! that does not follow from the mover's cards, or a broken state invariant.
//! None of them are transient, so callers should not retry.

use thiserror::Error;

use crate::game_state::onitama_types::Coordinate;

/// Unified error type for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A coordinate outside `[0,4]x[0,4]` was presented to a core function.
    #[error("coordinate ({x}, {y}) is outside the 5x5 board")]
    OutOfBounds { x: i16, y: i16 },

    /// A move whose origin holds no piece, whose destination holds a piece of
    /// the mover's color, or which does not follow from the referenced card.
    #[error("illegal move {origin} -> {destination}: {reason}")]
    IllegalMove {
        origin: Coordinate,
        destination: Coordinate,
        reason: String,
    },

    /// Duplicate piece positions, too many pieces for a color, or a card set
    /// that is not five distinct catalog cards.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A textual position could not be interpreted.
    #[error("invalid position notation: {0}")]
    InvalidNotation(String),

    /// A card name that is not part of the 16-card catalog.
    #[error("unknown card name '{0}'")]
    UnknownCard(String),

    /// Engine-level failure, for example an engine returning a move that is
    /// not legal in the current position.
    #[error("engine error: {0}")]
    Engine(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
