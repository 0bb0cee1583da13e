//! Evaluate one position and print the engine's choice.
//!
//! Run with:
//! `cargo run --release --bin evaluate_position -- "ppmpp/5/5/5/PPMPP tiger,crab frog,rabbit eel r" 4`
//!
//! The depth argument is optional and defaults to 3.

use onitama_engine::errors::{EngineError, EngineResult};
use onitama_engine::game_state::onitama_types::GameState;
use onitama_engine::search::alpha_beta::{evaluate, SearchConfig};
use onitama_engine::utils::render_game_state::render_game_state;
use tracing_subscriber::EnvFilter;

fn main() -> EngineResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let notation = args.next().ok_or_else(|| {
        EngineError::InvalidNotation("usage: evaluate_position \"<position>\" [depth]".to_owned())
    })?;
    let depth = match args.next() {
        Some(raw) => raw
            .parse::<u8>()
            .map_err(|e| EngineError::Engine(format!("invalid depth {raw:?}: {e}")))?,
        None => SearchConfig::default().max_ply,
    };

    let state = GameState::from_notation(&notation)?;
    println!("{}", render_game_state(&state));

    let evaluation = evaluate(&state, state.side_to_move, depth)?;
    match evaluation.mv {
        Some(mv) => {
            let card = state.cards(state.side_to_move)[usize::from(mv.card_index)];
            println!("best: {card} {mv}");
        }
        None => println!("best: none"),
    }
    println!("score: {}", evaluation.score);
    Ok(())
}
