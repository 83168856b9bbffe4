//! PGN-style game records.
//!
//! Movetext is long algebraic (`e2e4`), so a record is replayed by resolving
//! each token against the generated moves and applying it with `make_move`.
//! Drawbacks are stored in `LightDrawback` / `DarkDrawback` headers.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::drawbacks::lookup_drawback;
use crate::game_state::game_state::GameOutcome;
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::find_move;
use crate::utils::match_harness::MatchResult;

const LIGHT_DRAWBACK_HEADER: &str = "LightDrawback";
const DARK_DRAWBACK_HEADER: &str = "DarkDrawback";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub headers: BTreeMap<String, String>,
    pub moves: Vec<String>,
    pub result: String,
}

impl GameRecord {
    pub fn new(moves: &[Move], outcome: Option<GameOutcome>, date: NaiveDate) -> Self {
        let result = outcome.map_or("*", GameOutcome::result_token).to_owned();
        let mut headers = BTreeMap::new();
        headers.insert("Event".to_owned(), "Drawback Chess Game".to_owned());
        headers.insert("Site".to_owned(), "Local".to_owned());
        headers.insert("Date".to_owned(), date.format("%Y.%m.%d").to_string());
        headers.insert("White".to_owned(), "Light".to_owned());
        headers.insert("Black".to_owned(), "Dark".to_owned());
        headers.insert("Result".to_owned(), result.clone());
        Self {
            headers,
            moves: moves.iter().map(ToString::to_string).collect(),
            result,
        }
    }

    /// Record of a finished match, dated today.
    pub fn from_match(result: &MatchResult, light_name: &str, dark_name: &str) -> Self {
        let mut record = Self::new(&result.moves, result.outcome, Local::now().date_naive());
        record.headers.insert("White".to_owned(), light_name.to_owned());
        record.headers.insert("Black".to_owned(), dark_name.to_owned());
        for (color, header) in [
            (Color::Light, LIGHT_DRAWBACK_HEADER),
            (Color::Dark, DARK_DRAWBACK_HEADER),
        ] {
            if let Some(drawback) = result.final_state.drawback(color) {
                record.headers.insert(header.to_owned(), drawback.key.to_owned());
            }
        }
        record
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.headers {
            out.push_str(&format!("[{key} \"{}\"]\n", value.replace('"', "'")));
        }
        out.push('\n');

        let mut parts = Vec::with_capacity(self.moves.len() + 1);
        for (ply, lan) in self.moves.iter().enumerate() {
            if ply % 2 == 0 {
                parts.push(format!("{}. {lan}", ply / 2 + 1));
            } else {
                parts.push(lan.clone());
            }
        }
        parts.push(self.result.clone());
        out.push_str(&parts.join(" "));
        out.push('\n');
        out
    }

    pub fn parse(text: &str) -> ChessResult<Self> {
        let mut headers = BTreeMap::new();
        let mut moves = Vec::new();
        let mut result = "*".to_owned();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let (key, value) = inner
                    .split_once(' ')
                    .ok_or_else(|| ChessError::InvalidState(format!("malformed record header: {line}")))?;
                headers.insert(key.to_owned(), value.trim().trim_matches('"').to_owned());
                continue;
            }
            for token in line.split_whitespace() {
                if is_result_token(token) {
                    result = token.to_owned();
                } else if !token.ends_with('.') {
                    moves.push(token.to_owned());
                }
            }
        }

        Ok(Self {
            headers,
            moves,
            result,
        })
    }

    /// Replay from the standard position with the recorded drawbacks.
    pub fn replay(&self) -> ChessResult<GameState> {
        let drawback_for = |header: &str| {
            self.headers
                .get(header)
                .map(|key| lookup_drawback(key))
                .transpose()
        };
        let mut game = GameState::with_drawbacks(
            drawback_for(LIGHT_DRAWBACK_HEADER)?,
            drawback_for(DARK_DRAWBACK_HEADER)?,
        );

        for lan in &self.moves {
            let mv = find_move(&game, lan)?;
            if !game.make_move(mv) {
                return Err(ChessError::InvalidMove(format!(
                    "{lan} recorded after the game ended"
                )));
            }
        }
        Ok(game)
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::GameRecord;
    use crate::game_state::drawbacks::lookup_drawback;
    use crate::game_state::game_state::GameOutcome;
    use crate::utils::long_algebraic::play_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn text_round_trip_and_replay() {
        let mut game = GameState::new_game();
        let played = play_moves(&mut game, "e2e4 e7e5 g1f3").expect("legal");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        let record = GameRecord::new(&played, None, date);

        let text = record.to_text();
        assert!(text.contains("[Date \"2024.03.09\"]"));
        assert!(text.contains("1. e2e4 e7e5 2. g1f3 *"));

        let parsed = GameRecord::parse(&text).expect("parse");
        assert_eq!(parsed, record);
        assert_eq!(parsed.replay().expect("replay").get_fen(), game.get_fen());
    }

    #[test]
    fn replay_applies_recorded_drawbacks() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let mut record = GameRecord::new(&[], Some(GameOutcome::FiftyMoveRule), date);
        assert_eq!(record.result, "1/2-1/2");
        record
            .headers
            .insert("LightDrawback".to_owned(), "no_knights".to_owned());
        record.moves.push("g1f3".to_owned());
        assert!(record.replay().is_err());

        record.moves = vec!["e2e4".to_owned()];
        let game = record.replay().expect("pawn move allowed");
        assert_eq!(
            game.drawback(Color::Light),
            Some(lookup_drawback("no_knights").expect("registered"))
        );
    }
}
