use std::sync::Arc;
use std::thread;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::onitama_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::winner;
use crate::move_generation::move_generator::MoveGenerator;

/// Leaf statistics of a move tree. Decided positions are leaves too: nothing
/// is generated below a captured master or an occupied temple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub master_captures: usize,
    pub temple_arrivals: usize,
    /// Leaves reached at the full depth whose game is already decided.
    pub wins: usize,
    /// Positions decided before the full depth, which end their branch early.
    pub early_wins: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.master_captures += rhs.master_captures;
        self.temple_arrivals += rhs.temple_arrivals;
        self.wins += rhs.wins;
        self.early_wins += rhs.early_wins;
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> EngineResult<PerftCounts> {
    perft_single_thread(generator, game_state, depth)
}

pub fn perft_single_thread<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> EngineResult<PerftCounts> {
    game_state.validate()?;
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }

    for mv in generator.generate_moves(game_state, game_state.side_to_move) {
        perft_recurse(generator, game_state, &mv, depth, 1, &mut total)?;
    }

    Ok(total)
}

/// One spawned worker per root move.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> EngineResult<PerftCounts> {
    game_state.validate()?;
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_moves(game_state, game_state.side_to_move);
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        let root = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = perft_recurse(generator_ref.as_ref(), &root, &mv, depth, 1, &mut local);
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle
            .join()
            .map_err(|_| EngineError::Engine("perft worker thread panicked".to_owned()))?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    parent: &GameState,
    mv: &Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> EngineResult<()> {
    let child = apply_move(parent, mv)?;
    let decided = winner(&child).is_some();

    if current_depth == search_depth {
        counts.nodes += 1;

        let mover = parent.side_to_move;
        let target = parent.piece_at(mv.destination);
        if target.is_some_and(|p| p.color != mover) {
            counts.captures += 1;
        }
        if target.is_some_and(|p| p.color != mover && p.kind == PieceKind::Master) {
            counts.master_captures += 1;
        }
        if parent.masters[mover.index()] == Some(mv.origin)
            && mv.destination == mover.opposite().temple()
        {
            counts.temple_arrivals += 1;
        }
        if decided {
            counts.wins += 1;
        }

        return Ok(());
    }

    if decided {
        counts.early_wins += 1;
        return Ok(());
    }

    for next in generator.generate_moves(&child, child.side_to_move) {
        perft_recurse(generator, &child, &next, search_depth, current_depth + 1, counts)?;
    }

    Ok(())
}
