//! Drawback registry.
//!
//! A drawback is a named, pure move filter attached to one side. It runs
//! after pseudo-legal generation and may only remove moves; filters never
//! rely on list ordering.

use std::fmt;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

pub type PruneMovesFn = fn(&GameState, Vec<Move>) -> Vec<Move>;

#[derive(Clone, Copy)]
pub struct Drawback {
    /// Registry key, e.g. `no_knights`.
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prune_moves: PruneMovesFn,
}

impl Drawback {
    #[inline]
    pub fn apply(&self, game_state: &GameState, moves: Vec<Move>) -> Vec<Move> {
        (self.prune_moves)(game_state, moves)
    }
}

impl PartialEq for Drawback {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Drawback {}

impl fmt::Debug for Drawback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawback").field("key", &self.key).finish()
    }
}

fn no_knights(_game_state: &GameState, mut moves: Vec<Move>) -> Vec<Move> {
    moves.retain(|mv| mv.piece.kind != PieceKind::Knight);
    moves
}

fn no_castling(_game_state: &GameState, mut moves: Vec<Move>) -> Vec<Move> {
    moves.retain(|mv| !mv.is_castle);
    moves
}

fn no_en_passant(game_state: &GameState, mut moves: Vec<Move>) -> Vec<Move> {
    let Some(target) = game_state.en_passant_target else {
        return moves;
    };
    moves.retain(|mv| !(mv.piece.kind == PieceKind::Pawn && mv.is_capture && mv.to == target));
    moves
}

fn no_queen_moves(_game_state: &GameState, mut moves: Vec<Move>) -> Vec<Move> {
    moves.retain(|mv| mv.piece.kind != PieceKind::Queen);
    moves
}

fn no_king_captures(_game_state: &GameState, mut moves: Vec<Move>) -> Vec<Move> {
    moves.retain(|mv| !(mv.piece.kind == PieceKind::King && mv.is_capture));
    moves
}

const REGISTRY: [Drawback; 5] = [
    Drawback {
        key: "no_knights",
        name: "No Knights",
        description: "You cannot move knights.",
        prune_moves: no_knights,
    },
    Drawback {
        key: "no_castling",
        name: "No Castling",
        description: "You cannot castle.",
        prune_moves: no_castling,
    },
    Drawback {
        key: "no_en_passant",
        name: "No En Passant",
        description: "You cannot capture en passant.",
        prune_moves: no_en_passant,
    },
    Drawback {
        key: "no_queen_moves",
        name: "Frozen Queen",
        description: "Your queen cannot move.",
        prune_moves: no_queen_moves,
    },
    Drawback {
        key: "no_king_captures",
        name: "Pacifist King",
        description: "Your king cannot capture.",
        prune_moves: no_king_captures,
    },
];

pub fn all_drawbacks() -> &'static [Drawback] {
    &REGISTRY
}

pub fn lookup_drawback(key: &str) -> ChessResult<Drawback> {
    REGISTRY
        .iter()
        .find(|d| d.key == key)
        .copied()
        .ok_or_else(|| ChessError::UnknownDrawback(key.to_owned()))
}
