//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose`
//!
//! `RUST_LOG=onitama_engine=debug` additionally shows per-search summaries.

use onitama_engine::engines::engine_greedy::GreedyEngine;
use onitama_engine::engines::engine_minimax::MinimaxEngine;
use onitama_engine::engines::engine_trait::Engine;
use onitama_engine::errors::EngineResult;
use onitama_engine::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> EngineResult<()> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Customize these two lines to experiment with different engines/depths.
    let player1 = || Box::new(MinimaxEngine::new(4).with_threads(4)) as Box<dyn Engine>;
    let player2 = || Box::new(GreedyEngine::new()) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                max_plies: 200,
                ..MatchConfig::default()
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
