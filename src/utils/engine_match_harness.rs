//! Minimal head-to-head engine match harness for local testing.
//!
//! This module runs two `Engine` implementations against each other from a
//! seeded random deal of five cards.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::onitama_rules::deal_cards;
use crate::game_state::onitama_types::{Card, GameState, Move, PieceColor};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::winner;
use crate::move_generation::move_generator::generate_legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    RedWin,
    BlueWin,
    /// The given color was to move and had no legal move.
    NoLegalMoves(PieceColor),
    DrawMaxPlies,
}

impl MatchOutcome {
    fn from_winner(color: PieceColor) -> Self {
        match color {
            PieceColor::Red => MatchOutcome::RedWin,
            PieceColor::Blue => MatchOutcome::BlueWin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: PieceColor },
    NoLegalMoves { player: PlayerId, color: PieceColor },
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub started_at: DateTime<Utc>,
    pub dealt_cards: [Card; 5],
    pub final_state: GameState,
    /// `"<card> <move>"` for each ply played.
    pub played_moves: Vec<String>,
    pub red_move_count: u32,
    pub blue_move_count: u32,
    pub red_total_time_ns: u128,
    pub blue_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub started_at: Option<DateTime<Utc>>,
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        let started = self
            .started_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_owned());
        format!(
            "started={} games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            started,
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from a random deal.
///
/// `engine_red` is RED and moves first, `engine_blue` is BLUE.
pub fn play_engine_match(
    engine_red: Box<dyn Engine>,
    engine_blue: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> EngineResult<MatchResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start_state = GameState::new_game(deal_cards(&mut rng))?;
    play_engine_match_from_state(engine_red, engine_blue, start_state, config)
}

/// Play a single engine-vs-engine match from a caller-provided state.
pub fn play_engine_match_from_state(
    mut engine_red: Box<dyn Engine>,
    mut engine_blue: Box<dyn Engine>,
    start_state: GameState,
    config: MatchConfig,
) -> EngineResult<MatchResult> {
    start_state.validate()?;
    engine_red.new_game();
    engine_blue.new_game();

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        started_at: Utc::now(),
        dealt_cards: start_state.all_cards(),
        final_state: start_state.clone(),
        played_moves: Vec::new(),
        red_move_count: 0,
        blue_move_count: 0,
        red_total_time_ns: 0,
        blue_total_time_ns: 0,
    };
    let mut state = start_state;

    for _ in 0..config.max_plies {
        if let Some(color) = winner(&state) {
            result.outcome = MatchOutcome::from_winner(color);
            result.final_state = state;
            return Ok(result);
        }

        let mover = state.side_to_move;
        let legal_moves = generate_legal_moves(&state, mover);
        if legal_moves.is_empty() {
            result.outcome = MatchOutcome::NoLegalMoves(mover);
            result.final_state = state;
            return Ok(result);
        }

        let started = Instant::now();
        let out = match mover {
            PieceColor::Red => engine_red.choose_move(&state, &config.go_params)?,
            PieceColor::Blue => engine_blue.choose_move(&state, &config.go_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            PieceColor::Red => {
                result.red_move_count = result.red_move_count.saturating_add(1);
                result.red_total_time_ns = result.red_total_time_ns.saturating_add(elapsed_ns);
            }
            PieceColor::Blue => {
                result.blue_move_count = result.blue_move_count.saturating_add(1);
                result.blue_total_time_ns = result.blue_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let Some(chosen) = out.best_move else {
            let name = match mover {
                PieceColor::Red => engine_red.name(),
                PieceColor::Blue => engine_blue.name(),
            };
            return Err(EngineError::Engine(format!(
                "{name} returned no move with {} legal moves available",
                legal_moves.len()
            )));
        };
        if !legal_moves.contains(&chosen) {
            return Err(EngineError::Engine(format!(
                "engine returned illegal move {chosen}"
            )));
        }

        result.played_moves.push(describe_move(&state, &chosen));
        state = apply_move(&state, &chosen)?;
    }

    result.outcome = match winner(&state) {
        Some(color) => MatchOutcome::from_winner(color),
        None => MatchOutcome::DrawMaxPlies,
    };
    result.final_state = state;
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> EngineResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        started_at: Some(Utc::now()),
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_red = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (red, blue) = if player1_is_red {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            info!(game = i + 1, games = config.games, seed, red, blue, "series game starting");
        }

        let result = if player1_is_red {
            play_engine_match(
                player1_factory(),
                player2_factory(),
                seed,
                config.per_game.clone(),
            )?
        } else {
            play_engine_match(
                player2_factory(),
                player1_factory(),
                seed,
                config.per_game.clone(),
            )?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_red {
            (
                result.red_move_count,
                result.blue_move_count,
                result.red_total_time_ns,
                result.blue_total_time_ns,
            )
        } else {
            (
                result.blue_move_count,
                result.red_move_count,
                result.blue_total_time_ns,
                result.red_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let player_for = |color: PieceColor| {
            if (color == PieceColor::Red) == player1_is_red {
                PlayerId::Player1
            } else {
                PlayerId::Player2
            }
        };

        let mapped = match result.outcome {
            MatchOutcome::RedWin | MatchOutcome::BlueWin => {
                let color = if result.outcome == MatchOutcome::RedWin {
                    PieceColor::Red
                } else {
                    PieceColor::Blue
                };
                let player = player_for(color);
                match player {
                    PlayerId::Player1 => stats.player1_wins += 1,
                    PlayerId::Player2 => stats.player2_wins += 1,
                }
                SeriesOutcome::PlayerWin { player, color }
            }
            MatchOutcome::NoLegalMoves(color) => {
                stats.draws += 1;
                SeriesOutcome::NoLegalMoves {
                    player: player_for(color),
                    color,
                }
            }
            MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            info!(
                game = i + 1,
                games = config.games,
                result = ?mapped,
                plies = result.played_moves.len(),
                p1_wins = stats.player1_wins,
                p2_wins = stats.player2_wins,
                draws = stats.draws,
                "series game finished"
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn describe_move(state: &GameState, mv: &Move) -> String {
    let card = state.cards(state.side_to_move)[usize::from(mv.card_index)];
    format!("{card} {}->{}", mv.origin, mv.destination)
}

#[cfg(test)]
mod tests {
    use super::{
        play_engine_match, play_engine_match_from_state, play_engine_match_series, MatchConfig,
        MatchOutcome, MatchSeriesConfig, PlayerId, SeriesOutcome,
    };
    use crate::engines::engine_greedy::GreedyEngine;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
    use crate::errors::{EngineError, EngineResult};
    use crate::game_state::onitama_types::{GameState, Move, PieceColor};

    /// Always answers with a move that is never legal.
    struct CheatingEngine;

    impl Engine for CheatingEngine {
        fn name(&self) -> &str {
            "cheater"
        }

        fn choose_move(
            &mut self,
            game_state: &GameState,
            _params: &GoParams,
        ) -> EngineResult<EngineOutput> {
            let origin = game_state
                .master(game_state.side_to_move)
                .expect("test positions keep both masters")
                .position;
            Ok(EngineOutput {
                best_move: Some(Move {
                    origin,
                    destination: origin,
                    card_index: 0,
                    offset_index: 0,
                }),
                ..EngineOutput::default()
            })
        }
    }

    /// Never answers with a move.
    struct SilentEngine;

    impl Engine for SilentEngine {
        fn name(&self) -> &str {
            "silent"
        }

        fn choose_move(
            &mut self,
            _game_state: &GameState,
            _params: &GoParams,
        ) -> EngineResult<EngineOutput> {
            Ok(EngineOutput::default())
        }
    }

    #[test]
    fn missing_engine_move_is_an_error() {
        let result = play_engine_match(
            Box::new(SilentEngine),
            Box::new(RandomEngine::with_seed(0)),
            3,
            MatchConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::Engine(_))));
    }

    #[test]
    fn depth_zero_minimax_engine_plays_its_own_moves() {
        let start = GameState::new_standard_game().expect("standard game");
        let result = play_engine_match_from_state(
            Box::new(MinimaxEngine::new(0)),
            Box::new(MinimaxEngine::new(0)),
            start,
            MatchConfig {
                max_plies: 4,
                go_params: GoParams { depth: Some(0) },
            },
        )
        .expect("match should run");
        assert_eq!(result.red_move_count + result.blue_move_count, 4);
    }

    #[test]
    fn engine_match_harness_runs_random_vs_greedy() {
        let red = Box::new(RandomEngine::with_seed(1));
        let blue = Box::new(GreedyEngine::with_seed(2));
        let result = play_engine_match(
            red,
            blue,
            42,
            MatchConfig {
                max_plies: 40,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");

        assert!(result.red_move_count + result.blue_move_count > 0);
        assert_eq!(
            result.played_moves.len() as u32,
            result.red_move_count + result.blue_move_count
        );
        assert!(result.red_move_count >= result.blue_move_count);
    }

    #[test]
    fn same_seed_deals_the_same_cards() {
        let a = play_engine_match(
            Box::new(RandomEngine::with_seed(5)),
            Box::new(RandomEngine::with_seed(6)),
            99,
            MatchConfig {
                max_plies: 4,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");
        let b = play_engine_match(
            Box::new(RandomEngine::with_seed(5)),
            Box::new(RandomEngine::with_seed(6)),
            99,
            MatchConfig {
                max_plies: 4,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");
        assert_eq!(a.dealt_cards, b.dealt_cards);
        assert_eq!(a.played_moves, b.played_moves);
    }

    #[test]
    fn winning_capture_ends_the_match() {
        let start = GameState::from_notation("2m2/2P2/5/5/2M2 boar,ox frog,rabbit crab r")
            .expect("test position should parse");
        let result = play_engine_match_from_state(
            Box::new(MinimaxEngine::new(1)),
            Box::new(RandomEngine::with_seed(0)),
            start,
            MatchConfig::default(),
        )
        .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::RedWin);
        assert_eq!(result.red_move_count, 1);
        assert_eq!(result.blue_move_count, 0);
    }

    #[test]
    fn stuck_side_is_reported() {
        let start = GameState::from_notation("M3m/P4/P4/P4/P4 tiger,horse ox,crane boar r")
            .expect("test position should parse");
        let result = play_engine_match_from_state(
            Box::new(RandomEngine::with_seed(0)),
            Box::new(RandomEngine::with_seed(0)),
            start,
            MatchConfig::default(),
        )
        .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::NoLegalMoves(PieceColor::Red));
        assert!(result.played_moves.is_empty());
    }

    #[test]
    fn illegal_engine_move_is_an_error() {
        let result = play_engine_match(
            Box::new(CheatingEngine),
            Box::new(RandomEngine::with_seed(0)),
            3,
            MatchConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn engine_match_series_aggregates_results() {
        let stats = play_engine_match_series(
            || Box::new(MinimaxEngine::new(1)),
            || Box::new(RandomEngine::with_seed(17)),
            MatchSeriesConfig {
                games: 3,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 16,
                    ..MatchConfig::default()
                },
                verbose: false,
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 3);
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(
            u16::try_from(stats.outcomes.len()).expect("small"),
            stats.player1_wins + stats.player2_wins + stats.draws
        );
        assert!(stats.started_at.is_some());
        assert!(stats.overall_avg_move_time_ms >= 0.0);
        assert!(stats.outcomes.iter().all(|o| match o {
            SeriesOutcome::PlayerWin { player, .. } | SeriesOutcome::NoLegalMoves { player, .. } =>
                matches!(player, PlayerId::Player1 | PlayerId::Player2),
            SeriesOutcome::DrawMaxPlies => true,
        }));
        assert!(stats.report().contains("games=3"));
    }
}
