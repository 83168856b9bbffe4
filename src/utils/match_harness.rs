//! Head-to-head engine match harness.
//!
//! Runs two `Engine`s against each other from the standard position, with
//! optional drawbacks per side and an optional seeded random opening.

use std::time::Instant;

use log::info;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_iterative::IterativeEngine;
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::*;
use crate::game_state::drawbacks::Drawback;
use crate::game_state::game_state::GameOutcome;
use crate::move_generation::move_generator::generate_all_moves;
use crate::moves::chess_move::Move;
use crate::search::iterative_deepening::SearchConfig;

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Used by `self_play` for both sides.
    pub search: SearchConfig,
    pub light_drawback: Option<Drawback>,
    pub dark_drawback: Option<Drawback>,
    /// Random plies played before the engines take over.
    pub opening_plies: u8,
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            search: SearchConfig::new(3, 1.0),
            light_drawback: None,
            dark_drawback: None,
            opening_plies: 0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    /// `None` when the ply limit was reached first.
    pub outcome: Option<GameOutcome>,
    pub moves: Vec<Move>,
    pub final_state: GameState,
    pub light_total_time_ns: u128,
    pub dark_total_time_ns: u128,
}

impl MatchResult {
    pub fn winner(&self) -> Option<Color> {
        self.outcome.and_then(GameOutcome::winner)
    }

    pub fn result_token(&self) -> &'static str {
        self.outcome.map_or("*", GameOutcome::result_token)
    }

    pub fn moves_lan(&self) -> Vec<String> {
        self.moves.iter().map(ToString::to_string).collect()
    }
}

/// Play `light` against `dark` until the game ends or the ply limit.
pub fn play_match(
    light: &mut dyn Engine,
    dark: &mut dyn Engine,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    let mut game = GameState::with_drawbacks(config.light_drawback, config.dark_drawback);
    let mut moves = Vec::new();
    let mut rng = StdRng::seed_from_u64(config.seed);
    light.new_game();
    dark.new_game();

    for _ in 0..config.opening_plies {
        if game.is_game_over() {
            break;
        }
        let Some(mv) = generate_all_moves(&game).choose(&mut rng).copied() else {
            break;
        };
        game.make_move(mv);
        moves.push(mv);
    }

    let mut light_total_time_ns = 0u128;
    let mut dark_total_time_ns = 0u128;

    while !game.is_game_over() && moves.len() < usize::from(config.max_plies) {
        let side = game.side_to_move;
        let engine: &mut dyn Engine = match side {
            Color::Light => &mut *light,
            Color::Dark => &mut *dark,
        };

        let started = Instant::now();
        let output = engine.choose_move(&game)?;
        let spent = started.elapsed().as_nanos();
        match side {
            Color::Light => light_total_time_ns += spent,
            Color::Dark => dark_total_time_ns += spent,
        }

        let Some(mv) = output.best_move else {
            break;
        };
        if !game.make_move(mv) {
            return Err(ChessError::InvalidMove(format!(
                "{} played {mv} after the game ended",
                engine.name()
            )));
        }
        moves.push(mv);
    }

    let result = MatchResult {
        outcome: game.outcome(),
        moves,
        final_state: game,
        light_total_time_ns,
        dark_total_time_ns,
    };
    info!(
        "match finished after {} plies: {} ({:?})",
        result.moves.len(),
        result.result_token(),
        result.outcome
    );
    Ok(result)
}

/// Two iterative engines sharing `config.search`.
pub fn self_play(config: &MatchConfig) -> ChessResult<MatchResult> {
    let mut light = IterativeEngine::with_config(config.search.clone());
    let mut dark = IterativeEngine::with_config(config.search.clone());
    play_match(&mut light, &mut dark, config)
}
