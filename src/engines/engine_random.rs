//! Uniform random mover, for diagnostics and as a sparring partner.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_types::GameState;
use crate::move_generation::move_generator::generate_all_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    /// Reproducible engine; equal seeds pick equal moves.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::from_os_entropy()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput> {
        let moves = generate_all_moves(game_state);
        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine moves {}", moves.len()));
        out.best_move = moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}
