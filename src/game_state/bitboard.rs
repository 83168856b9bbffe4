//! Primitive bitboard set operations.
//!
//! Squares are `row * 8 + col`; all helpers are pure and total except
//! `lowest_set_square`, which has no answer for an empty board.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Bitboard, Square};

#[inline]
pub const fn set_bit(bitboard: Bitboard, square: Square) -> Bitboard {
    bitboard | (1u64 << square)
}

#[inline]
pub const fn clear_bit(bitboard: Bitboard, square: Square) -> Bitboard {
    bitboard & !(1u64 << square)
}

#[inline]
pub const fn test_bit(bitboard: Bitboard, square: Square) -> bool {
    (bitboard & (1u64 << square)) != 0
}

/// Square index for `(row, col)`. Callers check `in_bounds` first.
#[inline]
pub const fn square_of(row: i8, col: i8) -> Square {
    (row * 8 + col) as Square
}

#[inline]
pub const fn coords_of(square: Square) -> (i8, i8) {
    ((square / 8) as i8, (square % 8) as i8)
}

#[inline]
pub const fn in_bounds(row: i8, col: i8) -> bool {
    row >= 0 && row < 8 && col >= 0 && col < 8
}

#[inline]
pub const fn popcount(bitboard: Bitboard) -> u32 {
    bitboard.count_ones()
}

/// Index of the least significant set bit.
#[inline]
pub fn lowest_set_square(bitboard: Bitboard) -> ChessResult<Square> {
    if bitboard == 0 {
        return Err(ChessError::InvalidState(
            "lowest set square requested on an empty bitboard".to_owned(),
        ));
    }
    Ok(bitboard.trailing_zeros() as Square)
}

/// Iterator over set squares, lowest first.
#[derive(Debug, Clone, Copy)]
pub struct SquareIter(Bitboard);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let sq = self.0.trailing_zeros() as Square;
        self.0 &= self.0 - 1;
        Some(sq)
    }
}

#[inline]
pub const fn squares(bitboard: Bitboard) -> SquareIter {
    SquareIter(bitboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_and_test_are_consistent() {
        let bb = set_bit(0, 27);
        assert!(test_bit(bb, 27));
        assert!(!test_bit(bb, 28));
        assert_eq!(clear_bit(bb, 27), 0);
        assert_eq!(clear_bit(bb, 5), bb);
    }

    #[test]
    fn coordinates_round_trip_through_square_index() {
        assert_eq!(square_of(7, 4), 60);
        assert_eq!(coords_of(60), (7, 4));
        assert_eq!(coords_of(0), (0, 0));
        assert!(in_bounds(0, 7));
        assert!(!in_bounds(8, 0));
        assert!(!in_bounds(3, -1));
    }

    #[test]
    fn lowest_set_square_rejects_empty_board() {
        assert_eq!(lowest_set_square(0b1010_0000).expect("non-empty"), 5);
        assert!(matches!(
            lowest_set_square(0),
            Err(ChessError::InvalidState(_))
        ));
    }

    #[test]
    fn square_iterator_visits_every_bit() {
        let bb = set_bit(set_bit(set_bit(0, 0), 17), 63);
        let visited: Vec<_> = squares(bb).collect();
        assert_eq!(visited, vec![0, 17, 63]);
        assert_eq!(popcount(bb), 3);
    }
}
