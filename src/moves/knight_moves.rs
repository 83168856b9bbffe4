use crate::game_state::bitboard::{in_bounds, square_of};
use crate::game_state::chess_types::{Bitboard, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KNIGHT_ATTACKS: [Bitboard; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

const fn generate_knight_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut i = 0;
        while i < KNIGHT_OFFSETS.len() {
            let (dr, dc) = KNIGHT_OFFSETS[i];
            if in_bounds(row + dr, col + dc) {
                table[sq] |= 1u64 << square_of(row + dr, col + dc);
            }
            i += 1;
        }
        sq += 1;
    }

    table
}
