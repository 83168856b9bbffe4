//! King steps and castling.
//!
//! Castling ignores attacks entirely: a king may castle out of, through or
//! into an attacked square. The squares it leaves behind become ghost
//! squares the opponent can capture on the next ply.

use crate::game_state::bitboard::test_bit;
use crate::game_state::chess_rules::{castle_geometry, CastleSide};
use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_moves_shared::generate_piece_moves;
use crate::moves::chess_move::Move;
use crate::moves::king_moves::king_attacks;

pub fn generate_king_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    generate_piece_moves(game_state, side, PieceKind::King, out, |from, _| {
        king_attacks(from)
    });
    generate_castle_moves(game_state, side, out);
}

fn generate_castle_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    let king = Piece::new(side, PieceKind::King);
    let rooks = game_state.pieces[side.index()][PieceKind::Rook.index()];

    for castle_side in [CastleSide::HSide, CastleSide::ASide] {
        if !game_state.castling_flags.may_castle(side, castle_side) {
            continue;
        }
        let geometry = castle_geometry(side, castle_side);
        if test_bit(game_state.piece_bitboard(king), geometry.king_from)
            && test_bit(rooks, geometry.rook_from)
            && game_state.occupancy_all & geometry.between_mask == 0
        {
            out.push(Move::castle(king, geometry.king_from, geometry.king_to));
        }
    }
}
