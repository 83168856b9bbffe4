//! Move aggregation across all piece generators.

use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_moves_bishop::generate_bishop_moves;
use crate::move_generation::pseudo_moves_king::generate_king_moves;
use crate::move_generation::pseudo_moves_knight::generate_knight_moves;
use crate::move_generation::pseudo_moves_pawn::generate_pawn_moves;
use crate::move_generation::pseudo_moves_queen::generate_queen_moves;
use crate::move_generation::pseudo_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;

/// Typical upper bound on pseudo-legal moves; avoids regrowth in the hot path.
const MOVE_LIST_CAPACITY: usize = 64;

/// Every pseudo-legal move for `side`, before any drawback is applied.
pub fn generate_pseudo_moves(game_state: &GameState, side: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(MOVE_LIST_CAPACITY);
    generate_pawn_moves(game_state, side, &mut moves);
    generate_knight_moves(game_state, side, &mut moves);
    generate_bishop_moves(game_state, side, &mut moves);
    generate_rook_moves(game_state, side, &mut moves);
    generate_queen_moves(game_state, side, &mut moves);
    generate_king_moves(game_state, side, &mut moves);
    moves
}

/// Pseudo-legal, drawback-filtered moves for the side to move.
///
/// A side whose king has been captured has no moves at all.
pub fn generate_all_moves(game_state: &GameState) -> Vec<Move> {
    let side = game_state.side_to_move;
    if !game_state.has_king(side) {
        return Vec::new();
    }
    game_state.prune_moves(generate_pseudo_moves(game_state, side))
}
