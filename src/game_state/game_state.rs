//! Core incremental board state representation.
//!
//! `GameState` stores piece bitboards, occupancy caches, turn/state flags,
//! clocks, the repetition map, and the undo stack used by make/unmake.
//!
//! Two mutation paths share one undo stack:
//! - `make_move` runs the full rules bookkeeping (repetition, fifty-move and
//!   no-moves detection) and is meant for the real game.
//! - `make_search_move` skips that bookkeeping and is what search and perft
//!   call thousands of times per decision.
//!
//! `unmake_move` reverses either one exactly.

use std::collections::HashMap;

use log::{debug, warn};

use crate::chess_errors::ChessResult;
use crate::game_state::bitboard::{set_bit, square_of, test_bit};
use crate::game_state::chess_rules::{
    castle_geometry, castle_geometry_for_king_move, castle_ghost_path, CastleSide,
    FIFTY_MOVE_LIMIT, REPETITION_LIMIT,
};
use crate::game_state::chess_types::*;
use crate::game_state::drawbacks::Drawback;
use crate::game_state::undo_state::PositionSnapshot;
use crate::move_generation::move_generator::generate_all_moves;
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// King/rook "has moved" bits. Bits are only ever set during a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastlingFlags(u8);

impl CastlingFlags {
    const KING_MOVED: [u8; 2] = [1 << 0, 1 << 3];
    const ROOK_A_MOVED: [u8; 2] = [1 << 1, 1 << 4];
    const ROOK_H_MOVED: [u8; 2] = [1 << 2, 1 << 5];

    #[inline]
    pub const fn none_moved() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn all_moved() -> Self {
        Self(0x3F)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn king_moved(self, color: Color) -> bool {
        self.0 & Self::KING_MOVED[color.index()] != 0
    }

    #[inline]
    pub const fn rook_moved(self, color: Color, side: CastleSide) -> bool {
        let bit = match side {
            CastleSide::ASide => Self::ROOK_A_MOVED[color.index()],
            CastleSide::HSide => Self::ROOK_H_MOVED[color.index()],
        };
        self.0 & bit != 0
    }

    /// Neither the king nor the given rook has moved.
    #[inline]
    pub const fn may_castle(self, color: Color, side: CastleSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }

    #[inline]
    pub fn mark_king_moved(&mut self, color: Color) {
        self.0 |= Self::KING_MOVED[color.index()];
    }

    #[inline]
    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        self.0 |= match side {
            CastleSide::ASide => Self::ROOK_A_MOVED[color.index()],
            CastleSide::HSide => Self::ROOK_H_MOVED[color.index()],
        };
    }
}

/// Canonical position identity for repetition counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionSignature {
    pub pieces: [[Bitboard; 6]; 2],
    pub side_to_move: Color,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The winner moved onto a ghost square left by the loser's castle.
    KingCaptured { winner: Color },
    /// The loser was to move with an empty (drawback-filtered) move list.
    NoLegalMoves { loser: Color },
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::KingCaptured { winner } => Some(winner),
            GameOutcome::NoLegalMoves { loser } => Some(loser.opposite()),
            GameOutcome::ThreefoldRepetition | GameOutcome::FiftyMoveRule => None,
        }
    }

    /// PGN-style result token.
    pub fn result_token(self) -> &'static str {
        match self.winner() {
            Some(Color::Light) => "1-0",
            Some(Color::Dark) => "0-1",
            None => "1/2-1/2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bookkeeping {
    Full,
    Search,
}

/// Incremental game state optimized for fast move making/unmaking.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[Bitboard; 6]; 2],

    // Occupancy caches, rebuilt after every mutation.
    pub occupancy_by_color: [Bitboard; 2],
    pub occupancy_all: Bitboard,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_flags: CastlingFlags,
    pub en_passant_target: Option<Square>,
    /// Squares the last castling king stood on or crossed; capturable for one ply.
    pub castle_ghost_squares: Bitboard,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Repetition support ---
    pub repetition_counts: HashMap<PositionSignature, u8>,

    // --- Make/unmake stack ---
    pub undo_stack: Vec<UndoState>,

    pub game_over: bool,
    pub outcome: Option<GameOutcome>,

    /// Per-side move filters, indexed by `Color::index`.
    pub drawbacks: [Option<Drawback>; 2],
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_flags: CastlingFlags::none_moved(),
            en_passant_target: None,
            castle_ghost_squares: 0,

            halfmove_clock: 0,
            fullmove_number: 1,

            repetition_counts: HashMap::new(),
            undo_stack: Vec::new(),

            game_over: false,
            outcome: None,
            drawbacks: [None, None],
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting arrangement, no drawbacks.
    pub fn new_game() -> Self {
        let mut game = Self::default();
        game.init_standard_position();
        game
    }

    pub fn with_drawbacks(light: Option<Drawback>, dark: Option<Drawback>) -> Self {
        let mut game = Self::new_game();
        game.drawbacks = [light, dark];
        game
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Reset to the canonical starting arrangement. Drawbacks are kept.
    pub fn init_standard_position(&mut self) {
        let drawbacks = self.drawbacks;
        *self = Self::default();
        self.drawbacks = drawbacks;

        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for col in 0..8i8 {
            let kind = BACK_RANK[col as usize];
            let light = &mut self.pieces[Color::Light.index()];
            light[PieceKind::Pawn.index()] = set_bit(light[PieceKind::Pawn.index()], square_of(6, col));
            light[kind.index()] = set_bit(light[kind.index()], square_of(7, col));

            let dark = &mut self.pieces[Color::Dark.index()];
            dark[PieceKind::Pawn.index()] = set_bit(dark[PieceKind::Pawn.index()], square_of(1, col));
            dark[kind.index()] = set_bit(dark[kind.index()], square_of(0, col));
        }

        self.recalc_occupancy();
        self.record_current_position();
    }

    #[inline]
    pub fn drawback(&self, color: Color) -> Option<Drawback> {
        self.drawbacks[color.index()]
    }

    #[inline]
    pub fn set_drawback(&mut self, color: Color, drawback: Option<Drawback>) {
        self.drawbacks[color.index()] = drawback;
    }

    /// Apply the side to move's drawback filter, if one is registered.
    pub fn prune_moves(&self, moves: Vec<Move>) -> Vec<Move> {
        match self.drawbacks[self.side_to_move.index()] {
            Some(drawback) => drawback.apply(self, moves),
            None => moves,
        }
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn piece_bitboard(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.color.index()][piece.kind.index()]
    }

    #[inline]
    pub fn has_king(&self, color: Color) -> bool {
        self.pieces[color.index()][PieceKind::King.index()] != 0
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        for color in [Color::Light, Color::Dark] {
            if !test_bit(self.occupancy_by_color[color.index()], square) {
                continue;
            }
            for kind in ALL_PIECE_KINDS {
                if test_bit(self.pieces[color.index()][kind.index()], square) {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn signature(&self) -> PositionSignature {
        PositionSignature {
            pieces: self.pieces,
            side_to_move: self.side_to_move,
        }
    }

    #[inline]
    pub fn repetition_count(&self, signature: &PositionSignature) -> u8 {
        self.repetition_counts.get(signature).copied().unwrap_or(0)
    }

    /// Moves made so far, oldest first.
    pub fn move_history(&self) -> impl Iterator<Item = Move> + '_ {
        self.undo_stack.iter().map(|u| u.mv)
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            pieces: self.pieces,
            side_to_move: self.side_to_move,
            castling_flags: self.castling_flags,
            en_passant_target: self.en_passant_target,
            castle_ghost_squares: self.castle_ghost_squares,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            game_over: self.game_over,
            outcome: self.outcome,
        }
    }

    fn restore_snapshot(&mut self, snapshot: &PositionSnapshot) {
        self.pieces = snapshot.pieces;
        self.side_to_move = snapshot.side_to_move;
        self.castling_flags = snapshot.castling_flags;
        self.en_passant_target = snapshot.en_passant_target;
        self.castle_ghost_squares = snapshot.castle_ghost_squares;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
        self.game_over = snapshot.game_over;
        self.outcome = snapshot.outcome;
        self.recalc_occupancy();
    }

    /// Count the current position once in the repetition map.
    pub(crate) fn record_current_position(&mut self) {
        *self.repetition_counts.entry(self.signature()).or_insert(0) += 1;
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in [Color::Light, Color::Dark] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];
    }

    /// Play a move on the real game with full terminal bookkeeping.
    ///
    /// Returns `false` (and changes nothing) if the game is already over.
    /// Terminal conditions are read back from `game_over` / `outcome`.
    pub fn make_move(&mut self, mv: Move) -> bool {
        self.apply_move(mv, Bookkeeping::Full)
    }

    /// Play a move for speculative search: no repetition map update, no
    /// fifty-move or no-moves detection. King capture still ends the game.
    #[inline]
    pub fn make_search_move(&mut self, mv: Move) -> bool {
        self.apply_move(mv, Bookkeeping::Search)
    }

    /// Undo the most recent move made by either path.
    ///
    /// A no-op returning `false` when the stack is empty or its top is not
    /// `mv`.
    pub fn unmake_move(&mut self, mv: Move) -> bool {
        match self.undo_stack.last() {
            Some(top) if top.mv == mv => {}
            _ => {
                warn!("ignoring unmake of {mv}: not the most recent move");
                return false;
            }
        }
        let Some(record) = self.undo_stack.pop() else {
            return false;
        };

        if let Some(signature) = record.recorded_signature {
            if let Some(count) = self.repetition_counts.get_mut(&signature) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    self.repetition_counts.remove(&signature);
                }
            }
        }
        self.restore_snapshot(&record.snapshot);
        true
    }

    /// Counterpart of `make_search_move`; the undo record knows whether a
    /// repetition entry needs to be rolled back, so this is `unmake_move`.
    #[inline]
    pub fn unmake_search_move(&mut self, mv: Move) -> bool {
        self.unmake_move(mv)
    }

    /// Take back whatever move is on top of the stack.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let mv = self.undo_stack.last()?.mv;
        self.unmake_move(mv).then_some(mv)
    }

    fn apply_move(&mut self, mv: Move, bookkeeping: Bookkeeping) -> bool {
        if self.game_over {
            warn!("ignoring {mv}: game is already over");
            return false;
        }

        let mover = self.side_to_move;
        let enemy = mover.opposite();
        debug_assert!(mv.from < 64 && mv.to < 64, "square out of range in {mv:?}");
        debug_assert_eq!(mv.piece.color, mover, "moving piece must belong to side to move");
        debug_assert!(
            test_bit(self.piece_bitboard(mv.piece), mv.from),
            "origin of {mv:?} holds no {}",
            mv.piece
        );

        self.undo_stack.push(UndoState {
            mv,
            snapshot: self.snapshot(),
            recorded_signature: None,
        });

        let to_mask = 1u64 << mv.to;
        let ghosts = std::mem::take(&mut self.castle_ghost_squares);
        if ghosts & to_mask != 0 {
            self.pieces[enemy.index()][PieceKind::King.index()] = 0;
            self.recalc_occupancy();
            self.game_over = true;
            self.outcome = Some(GameOutcome::KingCaptured { winner: mover });
            self.side_to_move = enemy;
            debug!("{mover:?} captured the castled king via {mv}");
            return true;
        }

        if mv.is_capture {
            let capture_sq = if mv.piece.kind == PieceKind::Pawn && Some(mv.to) == self.en_passant_target {
                (i16::from(mv.to) - 8 * i16::from(mover.pawn_direction())) as Square
            } else {
                mv.to
            };
            self.remove_piece_at(capture_sq, enemy);
            self.halfmove_clock = 0;
        } else if mv.piece.kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        let bb = &mut self.pieces[mover.index()][mv.piece.kind.index()];
        *bb = (*bb & !(1u64 << mv.from)) | to_mask;

        self.update_moved_flags(mv);

        if mv.is_castle {
            self.castle_ghost_squares = castle_ghost_path(mv.from, mv.to);
            if let Some(geometry) = castle_geometry_for_king_move(mv.from, mv.to) {
                let rooks = &mut self.pieces[mover.index()][PieceKind::Rook.index()];
                if test_bit(*rooks, geometry.rook_from) {
                    *rooks = (*rooks & !(1u64 << geometry.rook_from)) | (1u64 << geometry.rook_to);
                }
                let side = if geometry.rook_from % 8 == 0 {
                    CastleSide::ASide
                } else {
                    CastleSide::HSide
                };
                self.castling_flags.mark_rook_moved(mover, side);
            }
        }

        self.en_passant_target = if mv.is_double_pawn_push() {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };

        if mover == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = enemy;
        self.recalc_occupancy();

        if bookkeeping == Bookkeeping::Full {
            self.detect_terminal_conditions();
        }
        true
    }

    fn detect_terminal_conditions(&mut self) {
        let signature = self.signature();
        let count = {
            let entry = self.repetition_counts.entry(signature).or_insert(0);
            *entry += 1;
            *entry
        };
        if let Some(record) = self.undo_stack.last_mut() {
            record.recorded_signature = Some(signature);
        }

        let outcome = if count >= REPETITION_LIMIT {
            Some(GameOutcome::ThreefoldRepetition)
        } else if self.halfmove_clock >= FIFTY_MOVE_LIMIT {
            Some(GameOutcome::FiftyMoveRule)
        } else if generate_all_moves(self).is_empty() {
            Some(GameOutcome::NoLegalMoves {
                loser: self.side_to_move,
            })
        } else {
            None
        };

        if let Some(outcome) = outcome {
            debug!("game over: {outcome:?}");
            self.game_over = true;
            self.outcome = Some(outcome);
        }
    }

    fn update_moved_flags(&mut self, mv: Move) {
        let mover = mv.piece.color;
        match mv.piece.kind {
            PieceKind::King => self.castling_flags.mark_king_moved(mover),
            PieceKind::Rook => {
                for side in [CastleSide::ASide, CastleSide::HSide] {
                    if castle_geometry(mover, side).rook_from == mv.from {
                        self.castling_flags.mark_rook_moved(mover, side);
                    }
                }
            }
            _ => {}
        }

        // A rook captured on its home square can never castle either.
        if mv.is_capture {
            let enemy = mover.opposite();
            for side in [CastleSide::ASide, CastleSide::HSide] {
                if castle_geometry(enemy, side).rook_from == mv.to {
                    self.castling_flags.mark_rook_moved(enemy, side);
                }
            }
        }
    }

    fn remove_piece_at(&mut self, square: Square, color: Color) -> Option<PieceKind> {
        let mask = 1u64 << square;
        for kind in ALL_PIECE_KINDS {
            let bb = &mut self.pieces[color.index()][kind.index()];
            if *bb & mask != 0 {
                *bb &= !mask;
                return Some(kind);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{CastlingFlags, GameOutcome, GameState};
    use crate::game_state::chess_rules::CastleSide;
    use crate::game_state::chess_types::*;
    use crate::moves::chess_move::Move;
    use crate::utils::long_algebraic::find_move;

    fn play(game: &mut GameState, lan: &str) -> Move {
        let mv = find_move(game, lan).expect("move should be generated");
        assert!(game.make_move(mv), "{lan} should apply");
        mv
    }

    #[test]
    fn standard_position_has_thirty_two_disjoint_pieces() {
        let game = GameState::new_game();
        assert_eq!(game.occupancy_all.count_ones(), 32);
        assert_eq!(
            game.occupancy(Color::Light) & game.occupancy(Color::Dark),
            0
        );
        assert_eq!(
            game.piece_at(60),
            Some(Piece::new(Color::Light, PieceKind::King))
        );
        assert_eq!(
            game.piece_at(3),
            Some(Piece::new(Color::Dark, PieceKind::Queen))
        );
        assert_eq!(game.repetition_count(&game.signature()), 1);
    }

    #[test]
    fn make_then_unmake_restores_everything() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let mv = play(&mut game, "g1f3");
        assert_ne!(game, before);
        assert!(game.unmake_move(mv));
        assert_eq!(game, before);
    }

    #[test]
    fn unmake_of_other_move_is_ignored() {
        let mut game = GameState::new_game();
        play(&mut game, "e2e4");
        let reply = find_move(&game, "e7e5").expect("reply exists");
        let snapshot = game.clone();
        assert!(!game.unmake_move(reply));
        assert_eq!(game, snapshot);

        let mut empty = GameState::new_game();
        assert!(!empty.unmake_move(reply));
    }

    #[test]
    fn double_push_opens_en_passant_window_for_one_ply() {
        let mut game = GameState::new_game();
        play(&mut game, "e2e4");
        assert_eq!(game.en_passant_target, Some(44)); // e3
        play(&mut game, "g8f6");
        assert_eq!(game.en_passant_target, None);
    }

    #[test]
    fn en_passant_capture_removes_pawn_behind_destination() {
        let mut game = GameState::new_game();
        for lan in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            play(&mut game, lan);
        }
        assert_eq!(game.en_passant_target, Some(19)); // d6
        let mv = play(&mut game, "e5d6");
        assert!(mv.is_capture);
        assert_eq!(game.piece_at(27), None); // d5 emptied
        assert_eq!(
            game.piece_at(19),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
        assert_eq!(game.halfmove_clock, 0);
    }

    #[test]
    fn castling_moves_rook_sets_flags_and_ghosts() {
        let mut game = GameState::new_game();
        for lan in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"] {
            play(&mut game, lan);
        }
        let castle = play(&mut game, "e1g1");
        assert!(castle.is_castle);
        assert_eq!(
            game.piece_at(61),
            Some(Piece::new(Color::Light, PieceKind::Rook))
        );
        assert_eq!(game.piece_at(63), None);
        assert!(game.castling_flags.king_moved(Color::Light));
        assert!(game.castling_flags.rook_moved(Color::Light, CastleSide::HSide));
        assert_eq!(game.castle_ghost_squares, (1u64 << 60) | (1u64 << 61));

        play(&mut game, "a7a6");
        assert_eq!(game.castle_ghost_squares, 0);
    }

    #[test]
    fn ghost_square_capture_ends_game_immediately() {
        // Dark rook on f2 can drop onto f1, which the castling king just crossed.
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1")
            .expect("FEN should parse");
        play(&mut game, "e1g1");
        let snipe = play(&mut game, "f2f1");
        assert!(snipe.is_capture);
        assert!(game.is_game_over());
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::KingCaptured {
                winner: Color::Dark
            })
        );
        assert!(!game.has_king(Color::Light));
        assert_eq!(game.side_to_move, Color::Light);

        assert!(game.unmake_move(snipe));
        assert!(!game.is_game_over());
        assert!(game.has_king(Color::Light));
    }

    #[test]
    fn moves_after_game_over_are_rejected() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1")
            .expect("FEN should parse");
        play(&mut game, "e1g1");
        play(&mut game, "f2f1");
        let frozen = game.clone();
        let any = Move::quiet(Piece::new(Color::Light, PieceKind::Rook), 56, 48);
        assert!(!game.make_move(any));
        assert_eq!(game, frozen);
    }

    #[test]
    fn threefold_repetition_draws() {
        let mut game = GameState::new_game();
        for lan in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"] {
            play(&mut game, lan);
            assert!(!game.is_game_over(), "{lan} should not end the game");
        }
        play(&mut game, "f6g8");
        assert_eq!(game.outcome(), Some(GameOutcome::ThreefoldRepetition));
    }

    #[test]
    fn fifty_halfmoves_without_capture_or_pawn_move_draws() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 49 80")
            .expect("FEN should parse");
        play(&mut game, "a1a2");
        assert_eq!(game.halfmove_clock, 50);
        assert_eq!(game.outcome(), Some(GameOutcome::FiftyMoveRule));
    }

    #[test]
    fn side_without_moves_loses() {
        use crate::game_state::drawbacks::lookup_drawback;
        // Dark king is walled in by its own queens, which may not move.
        let mut game =
            GameState::from_fen("kq6/qq6/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        game.set_drawback(
            Color::Dark,
            Some(lookup_drawback("no_queen_moves").expect("registered")),
        );
        play(&mut game, "a1a2");
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::NoLegalMoves { loser: Color::Dark })
        );
        assert_eq!(game.outcome().and_then(|o| o.winner()), Some(Color::Light));
    }

    #[test]
    fn search_path_skips_terminal_bookkeeping() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 49 80")
            .expect("FEN should parse");
        let before = game.clone();
        let mv = find_move(&game, "a1a2").expect("rook move");
        assert!(game.make_search_move(mv));
        assert!(!game.is_game_over());
        assert_eq!(game.repetition_counts, before.repetition_counts);
        assert!(game.unmake_move(mv));
        assert_eq!(game, before);
    }

    #[test]
    fn castling_flags_only_accumulate() {
        let mut flags = CastlingFlags::none_moved();
        assert!(flags.may_castle(Color::Dark, CastleSide::ASide));
        flags.mark_rook_moved(Color::Dark, CastleSide::ASide);
        assert!(!flags.may_castle(Color::Dark, CastleSide::ASide));
        assert!(flags.may_castle(Color::Dark, CastleSide::HSide));
        flags.mark_king_moved(Color::Dark);
        assert!(!flags.may_castle(Color::Dark, CastleSide::HSide));
        assert!(flags.may_castle(Color::Light, CastleSide::HSide));
    }
}
