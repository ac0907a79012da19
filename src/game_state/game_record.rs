//! Append-only record of the moves played in a game.
//!
//! The record is for display and export only; legality and search work from
//! the current `Position` alone.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::all_legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedMove {
    pub mv: Move,
    pub mover: Color,
    pub captured: Option<Piece>,
}

impl RecordedMove {
    pub fn new(mv: Move) -> Self {
        Self {
            mv,
            mover: mv.moving_piece.color,
            captured: mv.captured_piece,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    moves: Vec<RecordedMove>,
}

impl GameRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(RecordedMove::new(mv));
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordedMove> {
        self.moves.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<&RecordedMove> {
        self.moves.last()
    }

    /// The trailing `n` entries, oldest first.
    pub fn last_n(&self, n: usize) -> &[RecordedMove] {
        &self.moves[self.moves.len().saturating_sub(n)..]
    }

    /// Pieces of `color` that have been captured so far, in capture order.
    pub fn captured_pieces_of(&self, color: Color) -> Vec<Piece> {
        self.moves
            .iter()
            .filter_map(|entry| entry.captured)
            .filter(|piece| piece.color == color)
            .collect()
    }

    /// Replays every entry from `initial`, checking each against the legal
    /// move list of the position it is played in.
    pub fn replay(&self, initial: &Position) -> ChessResult<Position> {
        let mut position = initial.clone();
        for entry in &self.moves {
            if !all_legal_moves(&position).contains(&entry.mv) {
                return Err(ChessError::IllegalMove {
                    from: entry.mv.from,
                    to: entry.mv.to,
                });
            }
            position = apply_move(&position, &entry.mv);
        }
        Ok(position)
    }
}
