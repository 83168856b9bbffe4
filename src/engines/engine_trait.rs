//! Engine abstraction used by the match harness and the CLI.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::GameState;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// Light-minus-Dark score, when the engine computes one.
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move. `None` means there is nothing to play.
    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput>;
}
