//! Core board state representation.
//!
//! `Position` is the central value of the engine: an 8×8 mailbox board, the
//! side to move, castling rights, the en-passant target and the tracked king
//! squares. Positions are never mutated once handed out; the executor builds
//! a fresh one for every move.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

pub type Board = [[Option<Piece>; 8]; 8];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    // [color] -> square of that color's king
    pub(crate) king_squares: [Square; 2],
}

impl Position {
    /// Standard initial arrangement, white to move.
    pub fn new_game() -> Self {
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

        let mut board: Board = [[None; 8]; 8];
        for color in Color::ALL {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board[color.home_row() as usize][col] = Some(Piece::new(*kind, color));
                board[color.pawn_start_row() as usize][col] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }

        Self {
            board,
            side_to_move: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_target: None,
            king_squares: [
                Square::new(Color::White.home_row(), KING_HOME_COL),
                Square::new(Color::Black.home_row(), KING_HOME_COL),
            ],
        }
    }

    /// Builds a position from its parts, checking the one-king-per-side
    /// invariant and locating both kings. An en-passant target must sit
    /// behind a pawn that could just have made a double step.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> ChessResult<Self> {
        let mut kings: [Option<Square>; 2] = [None, None];
        for square in Square::all() {
            if let Some(Piece {
                kind: PieceKind::King,
                color,
            }) = board[square.row() as usize][square.col() as usize]
            {
                if kings[color.index()].replace(square).is_some() {
                    return Err(ChessError::InvalidPosition(format!(
                        "more than one {color} king"
                    )));
                }
            }
        }

        let white_king = kings[Color::White.index()]
            .ok_or_else(|| ChessError::InvalidPosition("missing white king".to_owned()))?;
        let black_king = kings[Color::Black.index()]
            .ok_or_else(|| ChessError::InvalidPosition("missing black king".to_owned()))?;

        let position = Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
            king_squares: [white_king, black_king],
        };
        if let Some(target) = en_passant_target {
            position.check_en_passant_target(target)?;
        }
        Ok(position)
    }

    fn check_en_passant_target(&self, target: Square) -> ChessResult<()> {
        let pusher = self.side_to_move.opposite();
        let dir = pusher.pawn_direction();
        let expected_row = pusher.pawn_start_row() as i8 + dir;

        let pawn_square = target.offset(dir, 0);
        let pushed_pawn = pawn_square.and_then(|sq| self.piece_at(sq));
        let valid = target.row() as i8 == expected_row
            && self.is_empty(target)
            && pushed_pawn == Some(Piece::new(PieceKind::Pawn, pusher));

        if valid {
            Ok(())
        } else {
            Err(ChessError::InvalidPosition(format!(
                "en-passant target {target} does not follow a {pusher} double step"
            )))
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Occupied squares with their pieces, row-major from a8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.row() as usize][square.col() as usize] = piece;
    }

    #[inline]
    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.board[square.row() as usize][square.col() as usize].take()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}
