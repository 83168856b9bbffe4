//! Pawn pushes and captures.
//!
//! Pawns never promote; one standing on its final row has no moves.

use crate::game_state::bitboard::{coords_of, in_bounds, set_bit, square_of, squares, test_bit};
use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_moves_shared::{build_move, capturable_ghosts, push_moves_to_targets};
use crate::moves::chess_move::Move;
use crate::moves::pawn_moves::pawn_attacks;

#[inline]
const fn starting_row(side: Color) -> i8 {
    match side {
        Color::Light => 6,
        Color::Dark => 1,
    }
}

pub fn generate_pawn_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    let piece = Piece::new(side, PieceKind::Pawn);
    let dir = side.pawn_direction();
    let occupied = game_state.occupancy_all;

    let mut capture_targets = game_state.occupancy(side.opposite()) | capturable_ghosts(game_state, side);
    if side == game_state.side_to_move {
        if let Some(ep) = game_state.en_passant_target {
            capture_targets = set_bit(capture_targets, ep);
        }
    }

    for from in squares(game_state.piece_bitboard(piece)) {
        let (row, col) = coords_of(from);

        if in_bounds(row + dir, col) {
            let single = square_of(row + dir, col);
            if !test_bit(occupied, single) {
                out.push(build_move(game_state, piece, from, single));

                if row == starting_row(side) {
                    let double = square_of(row + 2 * dir, col);
                    if !test_bit(occupied, double) {
                        out.push(build_move(game_state, piece, from, double));
                    }
                }
            }
        }

        let targets = pawn_attacks(side, from) & capture_targets;
        for to in squares(targets) {
            if test_bit(game_state.occupancy(side.opposite()), to)
                || test_bit(capturable_ghosts(game_state, side), to)
            {
                push_moves_to_targets(game_state, piece, from, 1u64 << to, out);
            } else {
                // En passant: the victim sits one row behind the target.
                let victim = Piece::new(side.opposite(), PieceKind::Pawn);
                out.push(Move::capture(piece, from, to, Some(victim)));
            }
        }
    }
}
