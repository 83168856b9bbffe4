//! One-step king neighbourhoods.

use crate::game_state::bitboard::{in_bounds, square_of};
use crate::game_state::chess_types::{Bitboard, Square};

pub const KING_ATTACKS: [Bitboard; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

const fn generate_king_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut dr = -1i8;
        while dr <= 1 {
            let mut dc = -1i8;
            while dc <= 1 {
                if (dr != 0 || dc != 0) && in_bounds(row + dr, col + dc) {
                    table[sq] |= 1u64 << square_of(row + dr, col + dc);
                }
                dc += 1;
            }
            dr += 1;
        }
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::king_attacks;

    #[test]
    fn corner_king_has_three_neighbours() {
        assert_eq!(king_attacks(63).count_ones(), 3);
        assert_eq!(king_attacks(60).count_ones(), 5);
        assert_eq!(king_attacks(27).count_ones(), 8);
    }
}
