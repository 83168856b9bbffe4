//! Errors used throughout the engine.
//!
//! `ChessError` is the single error type for fallible helpers (parsing,
//! registry lookup, bit extraction, background search plumbing). Rule-level
//! outcomes such as a finished game or an ignored unmake are not errors; they
//! are reported through return values and `GameState` fields instead.

use thiserror::Error;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// Internal state does not satisfy an operation's precondition.
    #[error("invalid game state: {0}")]
    InvalidState(String),
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("invalid square: {0}")]
    InvalidSquare(String),
    #[error("invalid move: {0}")]
    InvalidMove(String),
    #[error("unknown drawback '{0}'")]
    UnknownDrawback(String),
    /// The background search worker panicked or could not be spawned.
    #[error("search thread failure: {0}")]
    SearchThread(String),
}
