//! MVV-LVA style move ordering.
//!
//! Captures first (most valuable victim, then least valuable attacker),
//! then castles, then quiet moves by moving-piece kind with king moves
//! highest. Sorting is stable, so equal keys keep generation order.

use std::cmp::Reverse;

use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::Move;

const CAPTURE_BASE: i32 = 1_000_000;
const CASTLE_SCORE: i32 = 500_000;

/// Piece values used only for ordering. The king is far above any material
/// so ghost-square king captures always come first.
#[inline]
pub const fn ordering_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

#[inline]
const fn quiet_rank(kind: PieceKind) -> i32 {
    kind.index() as i32 + 1
}

pub fn move_order_score(mv: &Move) -> i32 {
    if mv.is_capture {
        let victim = mv.captured.map_or(PieceKind::Pawn, |p| p.kind);
        return CAPTURE_BASE + 10 * ordering_value(victim) - ordering_value(mv.piece.kind);
    }
    if mv.is_castle {
        return CASTLE_SCORE;
    }
    quiet_rank(mv.piece.kind)
}

/// Sort most promising first.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(move_order_score(mv)));
}
