use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_moves_shared::generate_piece_moves;
use crate::moves::chess_move::Move;
use crate::moves::slider_moves::bishop_attacks;

pub fn generate_bishop_moves(game_state: &GameState, side: Color, out: &mut Vec<Move>) {
    generate_piece_moves(game_state, side, PieceKind::Bishop, out, bishop_attacks);
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn bishop_captures_first_enemy_and_stops() {
        // Light bishop c1, dark pawn e3, light pawn b2.
        let game = GameState::from_fen("4k3/8/8/8/8/4p3/1P6/2B1K3 w - - 0 1")
            .expect("FEN should parse");
        let mut out = Vec::new();
        generate_bishop_moves(&game, Color::Light, &mut out);
        assert_eq!(out.len(), 2);
        let capture = out.iter().find(|mv| mv.is_capture).expect("capture on e3");
        assert_eq!(capture.to, 44);
        assert_eq!(capture.captured, Some(Piece::new(Color::Dark, PieceKind::Pawn)));
    }
}
