//! Crate root module declarations for the Onitama engine project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, and utility helpers) so binaries, benches, and external
//! tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod cards;
    pub mod game_state;
    pub mod onitama_rules;
    pub mod onitama_types;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod minimax;
    pub mod threading;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod position_generator;
    pub mod position_parser;
    pub mod render_game_state;
}
