//! GameState-to-FEN serializer.

use crate::game_state::chess_rules::CastleSide;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_name;

pub fn generate_fen(game_state: &GameState) -> String {
    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state),
        game_state.side_to_move.code(),
        generate_castling_field(game_state),
        game_state
            .en_passant_target
            .map_or_else(|| "-".to_owned(), square_name),
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for col in 0..8u8 {
            match game_state.piece_at(row * 8 + col) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if row < 7 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(game_state: &GameState) -> String {
    let flags = game_state.castling_flags;
    let field: String = [
        (Color::Light, CastleSide::HSide, 'K'),
        (Color::Light, CastleSide::ASide, 'Q'),
        (Color::Dark, CastleSide::HSide, 'k'),
        (Color::Dark, CastleSide::ASide, 'q'),
    ]
    .into_iter()
    .filter(|&(color, side, _)| flags.may_castle(color, side))
    .map(|(_, _, ch)| ch)
    .collect();

    if field.is_empty() {
        "-".to_owned()
    } else {
        field
    }
}

fn piece_to_fen_char(piece: Piece) -> char {
    match piece.color {
        Color::Light => piece.kind.code(),
        Color::Dark => piece.kind.code().to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::long_algebraic::find_move;

    #[test]
    fn starting_position_serializes_to_standard_fen() {
        assert_eq!(generate_fen(&GameState::new_game()), STARTING_POSITION_FEN);
    }

    #[test]
    fn fen_tracks_play() {
        let mut game = GameState::new_game();
        let mv = find_move(&game, "e2e4").expect("e2e4 generated");
        assert!(game.make_move(mv));
        assert_eq!(
            game.get_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn arbitrary_positions_round_trip() {
        for fen in [
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 20",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3",
            "8/8/8/8/8/8/PPPPPPPP/RNBQKBNR b - - 0 1",
        ] {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            assert_eq!(game.get_fen(), fen);
        }
    }
}
