//! Helpers shared by the per-piece generators.

use crate::game_state::bitboard::{squares, test_bit};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Squares the side to move may capture onto because the opponent's king
/// just castled across them. Empty when generating for the other side.
#[inline]
pub(crate) fn capturable_ghosts(game_state: &GameState, side: Color) -> Bitboard {
    if side == game_state.side_to_move {
        game_state.castle_ghost_squares
    } else {
        0
    }
}

/// Build the move for `piece` from `from` to `to`, classifying it as a
/// capture when the destination holds an enemy piece or a ghost square.
#[inline]
pub(crate) fn build_move(game_state: &GameState, piece: Piece, from: Square, to: Square) -> Move {
    let enemy = piece.color.opposite();
    if test_bit(capturable_ghosts(game_state, piece.color), to) {
        return Move::capture(piece, from, to, Some(Piece::new(enemy, PieceKind::King)));
    }
    if test_bit(game_state.occupancy(enemy), to) {
        return Move::capture(piece, from, to, game_state.piece_at(to));
    }
    Move::quiet(piece, from, to)
}

/// Push one move per set bit of `targets`.
#[inline]
pub(crate) fn push_moves_to_targets(
    game_state: &GameState,
    piece: Piece,
    from: Square,
    targets: Bitboard,
    out: &mut Vec<Move>,
) {
    for to in squares(targets) {
        out.push(build_move(game_state, piece, from, to));
    }
}

/// Generate moves for every `kind` piece of `side` using a target function
/// that receives the origin square and total occupancy.
#[inline]
pub(crate) fn generate_piece_moves<F>(
    game_state: &GameState,
    side: Color,
    kind: PieceKind,
    out: &mut Vec<Move>,
    targets_from: F,
) where
    F: Fn(Square, Bitboard) -> Bitboard,
{
    let piece = Piece::new(side, kind);
    let own_occ = game_state.occupancy(side);
    for from in squares(game_state.piece_bitboard(piece)) {
        let targets = targets_from(from, game_state.occupancy_all) & !own_occ;
        push_moves_to_targets(game_state, piece, from, targets, out);
    }
}
