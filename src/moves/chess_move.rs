//! Move value produced by the generators and consumed by make/unmake.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::utils::algebraic::square_name;

/// A single move. Immutable once built.
///
/// Equality and hashing cover the moving piece, both squares, and the two
/// flags; `captured` is informational (ordering, notation) and ignored.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
    pub is_castle: bool,
    pub captured: Option<Piece>,
}

impl Move {
    #[inline]
    pub const fn quiet(piece: Piece, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            is_capture: false,
            is_castle: false,
            captured: None,
        }
    }

    #[inline]
    pub const fn capture(piece: Piece, from: Square, to: Square, captured: Option<Piece>) -> Self {
        Self {
            piece,
            from,
            to,
            is_capture: true,
            is_castle: false,
            captured,
        }
    }

    #[inline]
    pub const fn castle(piece: Piece, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            is_capture: false,
            is_castle: true,
            captured: None,
        }
    }

    /// A pawn advancing two rows.
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.abs_diff(self.to) == 16
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece
            && self.from == other.from
            && self.to == other.to
            && self.is_capture == other.is_capture
            && self.is_castle == other.is_castle
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piece.hash(state);
        self.from.hash(state);
        self.to.hash(state);
        self.is_capture.hash(state);
        self.is_castle.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};

    #[test]
    fn equality_ignores_captured_piece_annotation() {
        let knight = Piece::new(Color::Light, PieceKind::Knight);
        let a = Move::capture(knight, 62, 45, Some(Piece::new(Color::Dark, PieceKind::Pawn)));
        let b = Move::capture(knight, 62, 45, None);
        assert_eq!(a, b);
        assert_ne!(a, Move::quiet(knight, 62, 45));
    }

    #[test]
    fn displays_as_long_algebraic() {
        let pawn = Piece::new(Color::Light, PieceKind::Pawn);
        let mv = Move::quiet(pawn, 52, 36);
        assert_eq!(mv.to_string(), "e2e4");
        assert!(mv.is_double_pawn_push());
    }
}
