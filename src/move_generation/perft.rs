//! Perft node counting over the search mutation path.

use std::thread;

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::generate_all_moves;
use crate::moves::chess_move::Move;

/// Leaf statistics for a perft run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub king_captures: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.king_captures += rhs.king_captures;
    }
}

/// Number of leaf nodes `depth` plies below `game_state`.
pub fn perft(game_state: &GameState, depth: u8) -> u64 {
    let mut scratch = game_state.clone();
    perft_recurse(&mut scratch, depth)
}

fn perft_recurse(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_all_moves(game_state);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        if game_state.make_search_move(mv) {
            nodes += perft_recurse(game_state, depth - 1);
            game_state.unmake_search_move(mv);
        }
    }
    nodes
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(game_state: &GameState, depth: u8) -> Vec<(Move, u64)> {
    let mut scratch = game_state.clone();
    let mut out = Vec::new();
    if depth == 0 {
        return out;
    }
    for mv in generate_all_moves(&scratch) {
        if scratch.make_search_move(mv) {
            let nodes = perft_recurse(&mut scratch, depth - 1);
            scratch.unmake_search_move(mv);
            out.push((mv, nodes));
        }
    }
    out
}

/// Perft with leaf classification.
pub fn perft_counts(game_state: &GameState, depth: u8) -> PerftCounts {
    let mut scratch = game_state.clone();
    let mut total = PerftCounts::default();
    counts_recurse(&mut scratch, depth, &mut total);
    total
}

fn counts_recurse(game_state: &mut GameState, depth: u8, total: &mut PerftCounts) {
    if depth == 0 {
        total.nodes += 1;
        return;
    }
    for mv in generate_all_moves(game_state) {
        if depth == 1 {
            total.nodes += 1;
            total.captures += u64::from(mv.is_capture);
            total.castles += u64::from(mv.is_castle);
            total.en_passant += u64::from(
                mv.piece.kind == PieceKind::Pawn
                    && mv.is_capture
                    && Some(mv.to) == game_state.en_passant_target,
            );
            total.king_captures += u64::from(mv.captured.is_some_and(|c| c.kind == PieceKind::King));
            continue;
        }
        if game_state.make_search_move(mv) {
            counts_recurse(game_state, depth - 1, total);
            game_state.unmake_search_move(mv);
        }
    }
}

/// Perft split across root moves, one scoped worker thread per root move.
pub fn perft_parallel(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth <= 1 {
        return perft_counts(game_state, depth);
    }

    let root_moves = generate_all_moves(game_state);
    let mut total = PerftCounts::default();
    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .into_iter()
            .map(|mv| {
                let mut child = game_state.clone();
                scope.spawn(move || {
                    let mut counts = PerftCounts::default();
                    if child.make_search_move(mv) {
                        counts_recurse(&mut child, depth - 1, &mut counts);
                    }
                    counts
                })
            })
            .collect();
        for handle in handles {
            // A worker only panics if make/unmake broke an invariant.
            if let Ok(counts) = handle.join() {
                total.merge(counts);
            }
        }
    });
    total
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_counts, perft_divide, perft_parallel};
    use crate::game_state::chess_types::*;

    #[test]
    fn start_position_perft_one_through_three() {
        let game = GameState::new_game();
        assert_eq!(perft(&game, 1), 20);
        assert_eq!(perft(&game, 2), 400);
        assert_eq!(perft(&game, 3), 8902);
    }

    #[test]
    fn divide_sums_to_perft() {
        let game = GameState::new_game();
        let divided = perft_divide(&game, 2);
        assert_eq!(divided.len(), 20);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }

    #[test]
    fn parallel_matches_single_thread() {
        let game = GameState::new_game();
        let serial = perft_counts(&game, 3);
        assert_eq!(serial.nodes, 8902);
        assert_eq!(serial.captures, 34);
        assert_eq!(perft_parallel(&game, 3), serial);
    }

    #[test]
    fn perft_leaves_state_untouched() {
        let game = GameState::new_game();
        let before = game.clone();
        perft(&game, 3);
        assert_eq!(game, before);
    }
}
