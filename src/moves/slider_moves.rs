//! Ray attacks for bishops, rooks and queens.
//!
//! Each ray stops at (and includes) the first occupied square; callers mask
//! out friendly pieces.

use crate::game_state::bitboard::{coords_of, in_bounds, square_of};
use crate::game_state::chess_types::{Bitboard, Square};

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    DIAGONAL_DIRECTIONS
        .iter()
        .fold(0, |acc, &dir| acc | trace_ray(square, dir, occupancy))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    ORTHOGONAL_DIRECTIONS
        .iter()
        .fold(0, |acc, &dir| acc | trace_ray(square, dir, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn trace_ray(square: Square, (dr, dc): (i8, i8), occupancy: Bitboard) -> Bitboard {
    let (mut row, mut col) = coords_of(square);
    let mut attacks = 0u64;

    loop {
        row += dr;
        col += dc;
        if !in_bounds(row, col) {
            break;
        }
        let bit = 1u64 << square_of(row, col);
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
    }

    attacks
}
