//! Human-readable move history and game export.
//!
//! History lines look like `♙ e2 → e4`, with ` ×♟` appended for captures.
//! The export writes PGN-style headers followed by coordinate-notation
//! movetext (`1. e2e4 e7e5 ...`); it is not SAN and is not meant to be read
//! back by PGN tools that expect SAN.

use std::collections::BTreeMap;

use chrono::Local;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::game_record::{GameRecord, RecordedMove};
use crate::game_state::game_state::Position;
use crate::game_state::game_status::GameStatus;

/// Number of trailing moves shown in the history panel.
pub const HISTORY_WINDOW: usize = 15;

pub fn history_line(entry: &RecordedMove) -> String {
    let mut line = format!(
        "{} {} → {}",
        entry.mv.moving_piece.glyph(),
        entry.mv.from,
        entry.mv.to
    );
    if let Some(captured) = entry.captured {
        line.push_str(&format!(" ×{}", captured.glyph()));
    }
    line
}

/// History lines for the last `window` moves, oldest first.
pub fn history_lines(record: &GameRecord, window: usize) -> Vec<String> {
    record.last_n(window).iter().map(history_line).collect()
}

/// Glyphs of the captured pieces of `color`, in capture order.
pub fn captured_summary(record: &GameRecord, color: Color) -> String {
    record
        .captured_pieces_of(color)
        .iter()
        .map(|piece| piece.glyph())
        .collect()
}

/// PGN result token for a game whose current position has `status` with
/// `side_to_move` to play.
pub fn result_token(status: GameStatus, side_to_move: Color) -> &'static str {
    match (status, side_to_move) {
        (GameStatus::Checkmate, Color::White) => "0-1",
        (GameStatus::Checkmate, Color::Black) => "1-0",
        (GameStatus::Stalemate, _) => "1/2-1/2",
        _ => "*",
    }
}

/// Exports the game with default headers, dated today.
pub fn export_game(initial: &Position, record: &GameRecord, result: &str) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Minimax Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), result.to_owned());

    let initial_fen = initial.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    export_with_headers(initial, record, &headers)
}

pub fn export_with_headers(
    initial: &Position,
    record: &GameRecord,
    headers: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();
    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_header_value(value)));
    }
    out.push('\n');

    // A setup with black to move opens with `1...`.
    let black_first = initial.side_to_move() == Color::Black;
    let mut parts = Vec::<String>::with_capacity(record.len() + 1);
    for (index, entry) in record.iter().enumerate() {
        let ply = index + usize::from(black_first);
        let number = ply / 2 + 1;
        if index == 0 && black_first {
            parts.push(format!("{number}... {}", entry.mv));
        } else if ply % 2 == 0 {
            parts.push(format!("{number}. {}", entry.mv));
        } else {
            parts.push(entry.mv.to_string());
        }
    }

    parts.push(headers.get("Result").cloned().unwrap_or_else(|| "*".to_owned()));
    out.push_str(&parts.join(" "));
    out.push('\n');
    out
}

fn escape_header_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::legal_move_generator::all_legal_moves;

    fn play(initial: &Position, moves: &[&str]) -> (Position, GameRecord) {
        let mut position = initial.clone();
        let mut record = GameRecord::new();
        for text in moves {
            let mv = all_legal_moves(&position)
                .into_iter()
                .find(|mv| mv.to_string() == *text)
                .expect("move should be legal");
            record.push(mv);
            position = apply_move(&position, &mv);
        }
        (position, record)
    }

    #[test]
    fn history_lines_show_glyphs_and_captures() {
        let (_, record) = play(&Position::new_game(), &["e2e4", "d7d5", "e4d5"]);
        assert_eq!(
            history_lines(&record, HISTORY_WINDOW),
            vec!["♙ e2 → e4", "♟ d7 → d5", "♙ e4 → d5 ×♟"]
        );
        assert_eq!(history_lines(&record, 1), vec!["♙ e4 → d5 ×♟"]);
        assert_eq!(captured_summary(&record, Color::Black), "♟");
        assert_eq!(captured_summary(&record, Color::White), "");
    }

    #[test]
    fn export_numbers_moves_and_carries_result() {
        let start = Position::new_game();
        let (position, record) = play(&start, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let result = result_token(GameStatus::Checkmate, position.side_to_move());
        assert_eq!(result, "0-1");

        let text = export_game(&start, &record, result);
        assert!(text.contains("[Result \"0-1\"]"));
        assert!(text.contains("[Date \""));
        assert!(!text.contains("[FEN"));
        assert!(text.ends_with("1. f2f3 e7e5 2. g2g4 d8h4 0-1\n"));
    }

    #[test]
    fn export_from_setup_position_records_fen() {
        let start =
            Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let (_, record) = play(&start, &["e8d7", "b7b8q"]);
        let text = export_game(&start, &record, "*");
        assert!(text.contains("[SetUp \"1\"]"));
        assert!(text.contains("[FEN \"4k3/1P6/8/8/8/8/8/4K3 b - - 0 1\"]"));
        assert!(text.ends_with("1... e8d7 2. b7b8q *\n"));
    }
}
