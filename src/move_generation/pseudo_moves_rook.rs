use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_moves_shared::generate_piece_moves;
use crate::moves::chess_move::Move;
use crate::moves::slider_moves::rook_attacks;

pub fn generate_rook_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    generate_piece_moves(game_state, side, PieceKind::Rook, out, rook_attacks);
}
