//! Error type shared by the rules engine, the controller and the parsers.
//!
//! Nothing in this crate is fatal: an input is accepted, rejected with one of
//! these variants (leaving every piece of state untouched), or deferred while
//! a promotion choice is outstanding.

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_status::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// Destination is not among the legal destinations of the origin square.
    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} belongs to {owner}, but {to_move} is to move")]
    NotSideToMove {
        square: Square,
        owner: Color,
        to_move: Color,
    },

    #[error("{0:?} is not a valid promotion piece")]
    InvalidPromotion(PieceKind),

    #[error("no promotion choice is pending")]
    NoPendingPromotion,

    #[error("a promotion choice for {from} -> {to} must be resolved first")]
    PromotionPending { from: Square, to: Square },

    /// Raised by move selection when the side to move is already mated or
    /// stalemated; callers are expected to classify first.
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("the game is over: {0}")]
    GameOver(GameStatus),

    #[error("the computer is still searching")]
    SearchPending,

    #[error("the search was stopped before it finished")]
    SearchStopped,

    #[error("it is not the computer's turn")]
    NotComputerTurn,

    /// A human move was offered while the computer owns the side to move.
    #[error("{0} is played by the computer")]
    ComputerToMove(Color),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
