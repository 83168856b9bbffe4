//! Pawn capture masks.
//!
//! Light pawns advance toward row 0, Dark pawns toward row 7. A pawn on its
//! last row has no captures (there is no promotion in this variant, so such a
//! pawn is simply stuck).

use crate::game_state::chess_types::{Bitboard, Color, Square};

pub const LIGHT_PAWN_ATTACKS: [Bitboard; 64] = generate_pawn_attacks(Color::Light);
pub const DARK_PAWN_ATTACKS: [Bitboard; 64] = generate_pawn_attacks(Color::Dark);

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

const fn generate_pawn_attacks(color: Color) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = sq % 8;
        let next_row = row + color.pawn_direction();

        if next_row >= 0 && next_row < 8 {
            let base = next_row as usize * 8;
            if col > 0 {
                table[sq] |= 1u64 << (base + col - 1);
            }
            if col < 7 {
                table[sq] |= 1u64 << (base + col + 1);
            }
        }
        sq += 1;
    }

    table
}
