//! Canonical rule constants.
//!
//! Starting arrangement, home squares for castling bookkeeping, and the
//! draw thresholds checked after every full-bookkeeping move.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u16 = 50;

/// Occurrence count of one position that draws the game.
pub const REPETITION_LIMIT: u8 = 3;

pub const LIGHT_KING_HOME: Square = 60;
pub const DARK_KING_HOME: Square = 4;

/// Which rook a castle uses: the a-file (long) or h-file (short) rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    ASide,
    HSide,
}

/// Squares involved in one castle for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook; all must be empty.
    pub between_mask: u64,
}

const fn mask_of(squares: &[Square]) -> u64 {
    let mut mask = 0u64;
    let mut i = 0;
    while i < squares.len() {
        mask |= 1u64 << squares[i];
        i += 1;
    }
    mask
}

pub const fn castle_geometry(color: Color, side: CastleSide) -> CastleGeometry {
    match (color, side) {
        (Color::Light, CastleSide::HSide) => CastleGeometry {
            king_from: 60,
            king_to: 62,
            rook_from: 63,
            rook_to: 61,
            between_mask: mask_of(&[61, 62]),
        },
        (Color::Light, CastleSide::ASide) => CastleGeometry {
            king_from: 60,
            king_to: 58,
            rook_from: 56,
            rook_to: 59,
            between_mask: mask_of(&[57, 58, 59]),
        },
        (Color::Dark, CastleSide::HSide) => CastleGeometry {
            king_from: 4,
            king_to: 6,
            rook_from: 7,
            rook_to: 5,
            between_mask: mask_of(&[5, 6]),
        },
        (Color::Dark, CastleSide::ASide) => CastleGeometry {
            king_from: 4,
            king_to: 2,
            rook_from: 0,
            rook_to: 3,
            between_mask: mask_of(&[1, 2, 3]),
        },
    }
}

/// Resolve a castle from the king's origin and destination squares.
pub fn castle_geometry_for_king_move(from: Square, to: Square) -> Option<CastleGeometry> {
    [Color::Light, Color::Dark]
        .into_iter()
        .flat_map(|color| {
            [
                castle_geometry(color, CastleSide::HSide),
                castle_geometry(color, CastleSide::ASide),
            ]
        })
        .find(|g| g.king_from == from && g.king_to == to)
}

/// Ghost squares left by a king move: the origin plus every square strictly
/// between origin and destination on the same row.
pub fn castle_ghost_path(from: Square, to: Square) -> u64 {
    let (lo, hi) = if from < to { (from, to) } else { (to, from) };
    let mut path = 1u64 << from;
    for sq in (lo + 1)..hi {
        path |= 1u64 << sq;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_short_castle_ghosts_origin_and_passed_square() {
        // e1 and f1
        assert_eq!(castle_ghost_path(60, 62), (1u64 << 60) | (1u64 << 61));
    }

    #[test]
    fn dark_long_castle_ghosts_origin_and_passed_square() {
        // e8 and d8
        assert_eq!(castle_ghost_path(4, 2), (1u64 << 4) | (1u64 << 3));
    }

    #[test]
    fn king_move_lookup_finds_only_castles() {
        let g = castle_geometry_for_king_move(60, 58).expect("light long castle");
        assert_eq!((g.rook_from, g.rook_to), (56, 59));
        assert!(castle_geometry_for_king_move(60, 61).is_none());
    }
}
