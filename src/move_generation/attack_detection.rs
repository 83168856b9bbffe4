//! Square attack queries.
//!
//! There is no check rule in drawback chess; these are used by evaluation
//! to spot a king standing on a square the opponent can reach.

use crate::game_state::bitboard::squares;
use crate::game_state::chess_types::*;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::slider_moves::{bishop_attacks, rook_attacks};

/// Pieces of `attacker` that attack `square`.
pub fn attackers_of(game_state: &GameState, square: Square, attacker: Color) -> Bitboard {
    let own = &game_state.pieces[attacker.index()];
    let queens = own[PieceKind::Queen.index()];

    // A pawn of `attacker` hits `square` exactly when a defending pawn on
    // `square` would hit the attacker's pawn.
    let pawns = pawn_attacks(attacker.opposite(), square) & own[PieceKind::Pawn.index()];
    let knights = knight_attacks(square) & own[PieceKind::Knight.index()];
    let kings = king_attacks(square) & own[PieceKind::King.index()];
    let diagonal = bishop_attacks(square, game_state.occupancy_all)
        & (own[PieceKind::Bishop.index()] | queens);
    let straight = rook_attacks(square, game_state.occupancy_all)
        & (own[PieceKind::Rook.index()] | queens);

    pawns | knights | kings | diagonal | straight
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker: Color) -> bool {
    attackers_of(game_state, square, attacker) != 0
}

/// Whether `color` still has a king and an enemy piece attacks it.
pub fn is_king_attacked(game_state: &GameState, color: Color) -> bool {
    let king = game_state.pieces[color.index()][PieceKind::King.index()];
    squares(king).any(|sq| is_square_attacked(game_state, sq, color.opposite()))
}
