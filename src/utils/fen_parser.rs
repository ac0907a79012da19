//! FEN-to-Position parser.
//!
//! Builds a validated position from a Forsyth-Edwards Notation string. The
//! halfmove and fullmove fields are optional and ignored, since the engine
//! keeps no clocks.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{Board, Position};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");

    for clock in parts.by_ref().take(2) {
        clock
            .parse::<u16>()
            .map_err(|_| invalid(&format!("invalid move clock '{clock}'")))?;
    }
    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_target = parse_en_passant_target(en_passant_part)?;

    let position = Position::from_parts(board, side_to_move, castling_rights, en_passant_target)?;

    let waiting = side_to_move.opposite();
    if is_square_attacked(&position, position.king_square(waiting), side_to_move) {
        return Err(ChessError::InvalidPosition(format!(
            "{waiting} king can be captured"
        )));
    }

    Ok(position)
}

fn invalid(message: &str) -> ChessError {
    ChessError::InvalidFen(message.to_owned())
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board: Board = [[None; 8]; 8];

    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("invalid piece character '{ch}'")))?;

            if col >= 8 {
                return Err(invalid("rank has too many files"));
            }

            board[row][col] = Some(piece);
            col += 1;
        }

        if col != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("invalid side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => return Err(invalid(&format!("invalid castling character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_target(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part).map(Some)
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
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

    Some(Piece::new(kind, color))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&position));

        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.castling_rights(), CastlingRights::ALL);
        assert_eq!(
            position.piece_at(Square::new(7, 4)),
            Some(Piece::new(PieceKind::King, Color::White))
        );
    }

    #[test]
    fn clock_fields_are_optional() {
        let position = parse_fen("4k3/8/8/8/8/8/8/4K3 b -").expect("short FEN should parse");
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.castling_rights(), CastlingRights::NONE);
    }

    #[test]
    fn rejects_malformed_layouts() {
        for bad in [
            "8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
        ] {
            assert!(
                matches!(parse_fen(bad), Err(ChessError::InvalidFen(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn rejects_position_where_waiting_king_is_capturable() {
        // Black king in check from the rook while white is to move.
        let result = parse_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1");
        assert!(matches!(result, Err(ChessError::InvalidPosition(_))));
    }
}
