//! Algebraic square names.
//!
//! Row 0 is the eighth rank, so `a8` is square 0 and `h1` is square 63.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert a coordinate such as `e4` to a square index.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let col = file - b'a';
    let row = b'8' - rank;
    Ok(row * 8 + col)
}

pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if square > 63 {
        return Err(ChessError::InvalidSquare(format!("index {square}")));
    }
    Ok(square_name(square))
}

/// Name of an in-range square. Out-of-range input renders as `??`.
pub fn square_name(square: Square) -> String {
    if square > 63 {
        return "??".to_owned();
    }
    let file = char::from(b'a' + square % 8);
    let rank = char::from(b'8' - square / 8);
    format!("{file}{rank}")
}
