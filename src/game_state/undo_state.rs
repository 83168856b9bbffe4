use crate::game_state::chess_types::*;
use crate::game_state::game_state::{CastlingFlags, GameOutcome, PositionSignature};
use crate::moves::chess_move::Move;

/// Every scalar `GameState` field a move can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub pieces: [[Bitboard; 6]; 2],
    pub side_to_move: Color,
    pub castling_flags: CastlingFlags,
    pub en_passant_target: Option<Square>,
    pub castle_ghost_squares: Bitboard,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub game_over: bool,
    pub outcome: Option<GameOutcome>,
}

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub snapshot: PositionSnapshot,
    /// Signature whose repetition count this move incremented, if any.
    pub recorded_signature: Option<PositionSignature>,
}
