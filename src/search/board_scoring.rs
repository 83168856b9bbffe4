//! Pluggable board evaluation.
//!
//! Scores are always from Light's point of view: positive favours Light,
//! negative favours Dark. Search maximizes on Light's turns and minimizes on
//! Dark's.

use crate::game_state::bitboard::squares;
use crate::game_state::chess_types::*;
use crate::move_generation::attack_detection::is_king_attacked;
use crate::search::piece_square_tables::STANDARD_TABLES;

/// Score of a position where one side has lost its king or cannot move.
pub const TERMINAL_SCORE: i32 = 99_999;

pub trait BoardScorer: Send + Sync {
    /// Light-minus-Dark score of `game_state`.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Terminal score when `loser` is the side that has run out of options.
#[inline]
pub const fn terminal_score_for_loser(loser: Color) -> i32 {
    match loser {
        Color::Light => -TERMINAL_SCORE,
        Color::Dark => TERMINAL_SCORE,
    }
}

/// Saturating score for a position missing a king, if any.
#[inline]
fn missing_king_score(game_state: &GameState) -> Option<i32> {
    match (game_state.has_king(Color::Light), game_state.has_king(Color::Dark)) {
        (true, true) => None,
        (false, true) => Some(-TERMINAL_SCORE),
        (true, false) => Some(TERMINAL_SCORE),
        (false, false) => Some(0),
    }
}

/// Material values, per-piece positional tables and king safety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationWeights {
    /// Indexed by `PieceKind::index`.
    pub piece_values: [i32; 6],
    pub piece_square_tables: [[i32; 64]; 6],
    /// Subtracted from a side whose king square is attacked. 0 disables it.
    pub king_danger_penalty: i32,
}

pub const STANDARD_PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

pub const STANDARD_KING_DANGER_PENALTY: i32 = 50;

pub const STANDARD_WEIGHTS: EvaluationWeights = EvaluationWeights {
    piece_values: STANDARD_PIECE_VALUES,
    piece_square_tables: STANDARD_TABLES,
    king_danger_penalty: STANDARD_KING_DANGER_PENALTY,
};

impl EvaluationWeights {
    pub const fn standard() -> Self {
        STANDARD_WEIGHTS
    }

    /// Same material, no positional terms.
    pub const fn material_only() -> Self {
        Self {
            piece_values: STANDARD_PIECE_VALUES,
            piece_square_tables: [[0; 64]; 6],
            king_danger_penalty: 0,
        }
    }

    #[inline]
    pub fn piece_value(&self, kind: PieceKind) -> i32 {
        self.piece_values[kind.index()]
    }

    /// Positional bonus of `piece` on `square`, mirrored for Dark.
    #[inline]
    pub fn square_bonus(&self, piece: Piece, square: Square) -> i32 {
        let index = match piece.color {
            Color::Light => square as usize,
            Color::Dark => 63 - square as usize,
        };
        self.piece_square_tables[piece.kind.index()][index]
    }
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self::standard()
    }
}

/// Material plus piece-square scoring with injected weights.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PieceSquareScorer {
    weights: EvaluationWeights,
}

impl PieceSquareScorer {
    pub const fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    pub const fn standard() -> Self {
        Self::new(STANDARD_WEIGHTS)
    }

    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    fn side_total(&self, game_state: &GameState, color: Color) -> i32 {
        let mut total = 0i32;
        for kind in ALL_PIECE_KINDS {
            let piece = Piece::new(color, kind);
            let bb = game_state.piece_bitboard(piece);
            total += self.weights.piece_value(kind) * bb.count_ones() as i32;
            for sq in squares(bb) {
                total += self.weights.square_bonus(piece, sq);
            }
        }
        if self.weights.king_danger_penalty != 0 && is_king_attacked(game_state, color) {
            total -= self.weights.king_danger_penalty;
        }
        total
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        if let Some(score) = missing_king_score(game_state) {
            return score;
        }
        self.side_total(game_state, Color::Light) - self.side_total(game_state, Color::Dark)
    }
}

/// Material count only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        if let Some(score) = missing_king_score(game_state) {
            return score;
        }
        ALL_PIECE_KINDS
            .iter()
            .map(|&kind| {
                let light = game_state.pieces[Color::Light.index()][kind.index()].count_ones() as i32;
                let dark = game_state.pieces[Color::Dark.index()][kind.index()].count_ones() as i32;
                (light - dark) * STANDARD_PIECE_VALUES[kind.index()]
            })
            .sum()
    }
}

static STANDARD_SCORER: PieceSquareScorer = PieceSquareScorer::standard();

/// Score `game_state` with the standard weights.
pub fn evaluate(game_state: &GameState) -> i32 {
    STANDARD_SCORER.score(game_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(evaluate(&game), 0);
        assert_eq!(MaterialScorer.score(&game), 0);
    }

    #[test]
    fn extra_queen_is_worth_about_nine_pawns() {
        let game = GameState::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let score = evaluate(&game);
        // Queen on d4 gets +5; kings are mirror images of each other.
        assert_eq!(score, 905);
        assert_eq!(MaterialScorer.score(&game), 900);
    }

    #[test]
    fn dark_reads_mirrored_square() {
        let weights = EvaluationWeights::standard();
        let light = Piece::new(Color::Light, PieceKind::Pawn);
        let dark = Piece::new(Color::Dark, PieceKind::Pawn);
        // Light pawn one step from promotion row, and Dark's mirror.
        assert_eq!(weights.square_bonus(light, 8), 50);
        assert_eq!(weights.square_bonus(dark, 55), 50);
    }

    #[test]
    fn missing_king_saturates() {
        let game = GameState::from_fen("8/8/8/8/8/8/QQQQQQQQ/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&game), TERMINAL_SCORE);
        let game = GameState::from_fen("4k3/8/8/8/8/8/QQQQQQQQ/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&game), -TERMINAL_SCORE);
    }

    #[test]
    fn attacked_king_costs_its_side() {
        // Dark rook on e8 bears down the open e-file onto the Light king.
        let exposed = GameState::from_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let shielded = GameState::from_fen("4r2k/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let flat = PieceSquareScorer::new(EvaluationWeights::material_only());
        let careful = PieceSquareScorer::new(EvaluationWeights {
            king_danger_penalty: STANDARD_KING_DANGER_PENALTY,
            ..EvaluationWeights::material_only()
        });

        assert_eq!(flat.score(&exposed), -500);
        assert_eq!(careful.score(&exposed), -550);
        // Blocking the file removes the penalty; only the pawn is counted.
        assert_eq!(careful.score(&shielded), -400);

        // Mirror: a Light rook on the Dark king's file helps Light.
        let mirrored = GameState::from_fen("4k3/8/8/8/8/8/8/4R2K b - - 0 1").expect("FEN should parse");
        assert_eq!(careful.score(&mirrored), 550);

        let unguarded = PieceSquareScorer::new(EvaluationWeights {
            king_danger_penalty: 0,
            ..EvaluationWeights::standard()
        });
        assert_eq!(evaluate(&exposed), unguarded.score(&exposed) - STANDARD_KING_DANGER_PENALTY);
    }

    #[test]
    fn injected_weights_change_the_score() {
        let game = GameState::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let flat = PieceSquareScorer::new(EvaluationWeights::material_only());
        assert_eq!(flat.score(&game), 900);
        assert_eq!(terminal_score_for_loser(Color::Dark), TERMINAL_SCORE);
    }
}
