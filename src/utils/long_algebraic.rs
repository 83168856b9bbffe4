//! Long algebraic move text (`e2e4`, `e1g1`).
//!
//! Text is resolved against the generated move list, so a parsed move always
//! carries the same flags the generators would have produced.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::generate_all_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

pub fn move_to_long_algebraic(mv: &Move) -> String {
    mv.to_string()
}

/// Find the generated move matching `text` in `game_state`.
pub fn find_move(game_state: &GameState, text: &str) -> ChessResult<Move> {
    let text = text.trim();
    if text.len() != 4 || !text.is_ascii() {
        return Err(ChessError::InvalidMove(format!("malformed move text '{text}'")));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    generate_all_moves(game_state)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to)
        .ok_or_else(|| ChessError::InvalidMove(format!("{text} is not available in this position")))
}

/// Resolve and play a whitespace-separated sequence of moves with full
/// bookkeeping. Stops at the first move that cannot be resolved or applied.
pub fn play_moves(game_state: &mut GameState, moves: &str) -> ChessResult<Vec<Move>> {
    let mut played = Vec::new();
    for text in moves.split_whitespace() {
        let mv = find_move(game_state, text)?;
        if !game_state.make_move(mv) {
            return Err(ChessError::InvalidMove(format!(
                "{text} rejected: game is already over"
            )));
        }
        played.push(mv);
    }
    Ok(played)
}

#[cfg(test)]
mod tests {
    use super::{find_move, move_to_long_algebraic, play_moves};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;

    #[test]
    fn resolves_generated_flags() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let castle = find_move(&game, "e1c1").expect("long castle");
        assert!(castle.is_castle);
        assert_eq!(move_to_long_algebraic(&castle), "e1c1");
    }

    #[test]
    fn rejects_unavailable_and_malformed_text() {
        let game = GameState::new_game();
        assert!(matches!(find_move(&game, "e2e5"), Err(ChessError::InvalidMove(_))));
        assert!(matches!(find_move(&game, "e2"), Err(ChessError::InvalidMove(_))));
        assert!(matches!(find_move(&game, "z2e4"), Err(ChessError::InvalidSquare(_))));
    }

    #[test]
    fn plays_a_sequence() {
        let mut game = GameState::new_game();
        let played = play_moves(&mut game, "e2e4 e7e5 g1f3").expect("legal sequence");
        assert_eq!(played.len(), 3);
        assert_eq!(game.side_to_move, Color::Dark);
        assert!(play_moves(&mut game, "a2a3").is_err());
    }
}
