use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_moves_shared::generate_piece_moves;
use crate::moves::chess_move::Move;
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    generate_piece_moves(game_state, side, PieceKind::Knight, out, |from, _| {
        knight_attacks(from)
    });
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_knights_have_four_moves_per_side() {
        let game = GameState::new_game();
        for side in [Color::Light, Color::Dark] {
            let mut out = Vec::new();
            generate_knight_moves(&game, side, &mut out);
            assert_eq!(out.len(), 4);
            assert!(out.iter().all(|mv| !mv.is_capture));
        }
    }
}
