//! Engine-versus-engine games without any user interface.
//!
//! Runs two `Engine` implementations against each other from a start
//! position, optionally after a seeded random opening prefix so repeated
//! games between deterministic engines still differ.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::engines::engine_trait::Engine;
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Color;
use crate::game_state::game_record::GameRecord;
use crate::game_state::game_state::Position;
use crate::game_state::game_status::{classify, GameStatus};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::all_legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 0,
            opening_max_plies: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelfPlayResult {
    pub outcome: MatchOutcome,
    pub initial: Position,
    pub final_position: Position,
    /// Every move of the game, opening prefix included.
    pub record: GameRecord,
    pub opening_plies: usize,
    pub white_time: Duration,
    pub black_time: Duration,
}

impl SelfPlayResult {
    /// Plies played after the opening prefix.
    pub fn engine_plies(&self) -> usize {
        self.record.len() - self.opening_plies
    }
}

pub fn play_self_play(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    start: &Position,
    seed: u64,
    config: SelfPlayConfig,
) -> ChessResult<SelfPlayResult> {
    white.new_game();
    black.new_game();
    info!(
        white = white.name(),
        black = black.name(),
        seed,
        max_plies = config.max_plies,
        "self-play game started"
    );

    let mut record = GameRecord::new();
    let mut position = apply_seeded_random_opening(start, seed, config, &mut record);
    let opening_plies = record.len();

    let mut white_time = Duration::ZERO;
    let mut black_time = Duration::ZERO;

    let outcome = loop {
        match classify(&position) {
            GameStatus::Checkmate => {
                break match position.side_to_move() {
                    Color::White => MatchOutcome::BlackWinCheckmate,
                    Color::Black => MatchOutcome::WhiteWinCheckmate,
                };
            }
            GameStatus::Stalemate => break MatchOutcome::DrawStalemate,
            GameStatus::Playing | GameStatus::Check => {}
        }
        if record.len() - opening_plies >= usize::from(config.max_plies) {
            break MatchOutcome::DrawMaxPlies;
        }

        let mover = position.side_to_move();
        let started = Instant::now();
        let result = match mover {
            Color::White => white.choose_move(&position)?,
            Color::Black => black.choose_move(&position)?,
        };
        match mover {
            Color::White => white_time += started.elapsed(),
            Color::Black => black_time += started.elapsed(),
        }

        if !all_legal_moves(&position).contains(&result.mv) {
            return Err(ChessError::IllegalMove {
                from: result.mv.from,
                to: result.mv.to,
            });
        }
        debug!(ply = record.len() + 1, mv = %result.mv, score = result.score, "self-play move");
        record.push(result.mv);
        position = apply_move(&position, &result.mv);
    };

    info!(?outcome, plies = record.len(), "self-play game finished");
    Ok(SelfPlayResult {
        outcome,
        initial: start.clone(),
        final_position: position,
        record,
        opening_plies,
        white_time,
        black_time,
    })
}

/// Plays between `opening_min_plies` and `opening_max_plies` uniformly random
/// legal moves, stopping early if the game ends.
fn apply_seeded_random_opening(
    start: &Position,
    seed: u64,
    config: SelfPlayConfig,
    record: &mut GameRecord,
) -> Position {
    let min = config.opening_min_plies.min(config.opening_max_plies);
    let max = config.opening_max_plies.max(min);
    let mut rng = StdRng::seed_from_u64(seed);
    let plies = rng.random_range(min..=max);

    let mut position = start.clone();
    for _ in 0..plies {
        let moves = all_legal_moves(&position);
        let Some(mv) = moves.choose(&mut rng) else {
            break;
        };
        record.push(*mv);
        position = apply_move(&position, mv);
    }
    position
}
