//! Crate root module declarations for the drawback chess engine.
//!
//! Exposes the rules engine (game state, move generation, drawbacks), the
//! search stack, engines, and notation helpers under stable module paths for
//! the binary, integration tests, and benches.

pub mod chess_errors;

pub mod game_state {
    pub mod bitboard;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod drawbacks;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod chess_move;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod slider_moves;
}

pub mod move_generation {
    pub mod attack_detection;
    pub mod move_generator;
    pub mod perft;
    pub mod pseudo_moves_bishop;
    pub mod pseudo_moves_king;
    pub mod pseudo_moves_knight;
    pub mod pseudo_moves_pawn;
    pub mod pseudo_moves_queen;
    pub mod pseudo_moves_rook;
    pub mod pseudo_moves_shared;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod piece_square_tables;
    pub mod search_progress;
}

pub mod engines {
    pub mod engine_iterative;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod game_record;
    pub mod long_algebraic;
    pub mod match_harness;
    pub mod render_game_state;
}
