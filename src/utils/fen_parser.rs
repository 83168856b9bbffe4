//! FEN-to-GameState parser.
//!
//! The first board field is the eighth rank, which is row 0 here. Castling
//! letters are translated into "has moved" flags: a missing letter marks
//! that rook as moved, and a color with no letters also has its king marked.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::CastleSide;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::CastlingFlags;
use crate::utils::algebraic::algebraic_to_square;

fn fen_error(msg: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(msg.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| fen_error("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| fen_error("missing side to move"))?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(fen_error("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_flags = parse_castling_field(castling_part)?;
    game_state.en_passant_target = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| fen_error(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| fen_error(format!("invalid fullmove number: {fullmove_part}")))?;

    game_state.recalc_occupancy();
    game_state.record_current_position();

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != 8 {
        return Err(fen_error("board layout must contain 8 ranks"));
    }

    for (row, row_str) in rows.iter().enumerate() {
        let mut col = 0usize;

        for ch in row_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(fen_error(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| fen_error(format!("invalid piece character '{ch}'")))?;
            if col >= 8 {
                return Err(fen_error(format!("rank {} has too many files", 8 - row)));
            }

            let sq = row * 8 + col;
            game_state.pieces[piece.color.index()][piece.kind.index()] |= 1u64 << sq;
            col += 1;
        }

        if col != 8 {
            return Err(fen_error(format!("rank {} does not sum to 8 files", 8 - row)));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(fen_error(format!("invalid side to move: {side_part}"))),
    }
}

fn parse_castling_field(castling_part: &str) -> ChessResult<CastlingFlags> {
    let mut allowed = [[false; 2]; 2];
    if castling_part != "-" {
        for ch in castling_part.chars() {
            let (color, side) = match ch {
                'K' => (Color::Light, CastleSide::HSide),
                'Q' => (Color::Light, CastleSide::ASide),
                'k' => (Color::Dark, CastleSide::HSide),
                'q' => (Color::Dark, CastleSide::ASide),
                _ => return Err(fen_error(format!("invalid castling character: {ch}"))),
            };
            allowed[color.index()][side as usize] = true;
        }
    }

    let mut flags = CastlingFlags::none_moved();
    for color in [Color::Light, Color::Dark] {
        for side in [CastleSide::ASide, CastleSide::HSide] {
            if !allowed[color.index()][side as usize] {
                flags.mark_rook_moved(color, side);
            }
        }
        if allowed[color.index()] == [false, false] {
            flags.mark_king_moved(color);
        }
    }
    Ok(flags)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part).map(Some)
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else {
        Color::Dark
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::{CastleSide, STARTING_POSITION_FEN};
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_fen_matches_standard_setup() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(parsed, GameState::new_game());
    }

    #[test]
    fn partial_castling_field_marks_missing_rooks() {
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 20").expect("FEN should parse");
        assert_eq!(game.side_to_move, Color::Dark);
        assert!(game.castling_flags.may_castle(Color::Light, CastleSide::HSide));
        assert!(!game.castling_flags.may_castle(Color::Light, CastleSide::ASide));
        assert!(game.castling_flags.may_castle(Color::Dark, CastleSide::ASide));
        assert!(!game.castling_flags.may_castle(Color::Dark, CastleSide::HSide));
        assert_eq!(game.halfmove_clock, 3);
        assert_eq!(game.fullmove_number, 20);
    }

    #[test]
    fn clocks_default_when_omitted() {
        let game = parse_fen("4k3/8/8/8/8/8/8/4K3 w").expect("short FEN should parse");
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.fullmove_number, 1);
        assert!(game.castling_flags.king_moved(Color::Light));
    }

    #[test]
    fn malformed_fields_are_reported() {
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8 w - - 0 1"),
            Err(ChessError::InvalidFen(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(ChessError::InvalidFen(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4X3 w - - 0 1"),
            Err(ChessError::InvalidFen(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1"),
            Err(ChessError::InvalidSquare(_))
        ));
    }
}
