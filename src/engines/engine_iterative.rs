//! Engine front-end over the iterative deepening search.

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_types::GameState;
use crate::search::iterative_deepening::{SearchConfig, SearchEngine};

pub struct IterativeEngine {
    search: SearchEngine,
    config: SearchConfig,
}

impl IterativeEngine {
    pub fn new(max_depth: u8, time_limit_seconds: f64) -> Self {
        Self::with_config(SearchConfig::new(max_depth, time_limit_seconds))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            search: SearchEngine::new(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Engine for IterativeEngine {
    fn name(&self) -> &str {
        "iterative"
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput> {
        let result = self.search.search(game_state, &self.config);
        Ok(EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            info_lines: vec![format!(
                "depth {} score {} nodes {} time {} ms",
                result.reached_depth, result.best_score, result.nodes, result.elapsed_ms
            )],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::IterativeEngine;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::chess_types::GameState;

    #[test]
    fn returns_a_scored_move() {
        let game = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("FEN should parse");
        let mut engine = IterativeEngine::new(2, 5.0);
        let out = engine.choose_move(&game).expect("search");
        assert_eq!(out.best_move.map(|m| m.to_string()), Some("d2d5".to_owned()));
        assert!(out.score.is_some_and(|s| s > 0));
        assert_eq!(out.info_lines.len(), 1);
    }
}
