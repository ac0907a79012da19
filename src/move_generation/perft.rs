//! Perft: exhaustive legal-move tree counting, the move generator's
//! correctness oracle.

use std::thread;

use crate::game_state::chess_types::Move;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, has_any_legal_move};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }
    perft_recurse(position, depth, &mut total);
    total
}

/// One worker thread per root move.
pub fn perft_multi_threaded(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return perft(position, depth);
    }

    let handles: Vec<_> = all_legal_moves(position)
        .into_iter()
        .map(|mv| {
            let root = position.clone();
            thread::spawn(move || {
                let mut local = PerftCounts::default();
                count_move(&root, &mv, depth, &mut local);
                local
            })
        })
        .collect();

    let mut total = PerftCounts::default();
    for handle in handles {
        match handle.join() {
            Ok(local) => total.merge(local),
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
    total
}

/// Node counts below each root move, in generation order.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(String, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    all_legal_moves(position)
        .iter()
        .map(|mv| {
            let mut local = PerftCounts::default();
            count_move(position, mv, depth, &mut local);
            (mv.to_string(), local.nodes)
        })
        .collect()
}

fn perft_recurse(position: &Position, depth: u8, counts: &mut PerftCounts) {
    for mv in all_legal_moves(position) {
        count_move(position, &mv, depth, counts);
    }
}

fn count_move(position: &Position, mv: &Move, depth: u8, counts: &mut PerftCounts) {
    let next = apply_move(position, mv);
    if depth > 1 {
        perft_recurse(&next, depth - 1, counts);
        return;
    }

    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant {
        counts.en_passant += 1;
    }
    if mv.is_castle {
        counts.castles += 1;
    }
    if mv.promotion_piece.is_some() {
        counts.promotions += 1;
    }
    if is_king_in_check(&next, next.side_to_move()) {
        counts.checks += 1;
        if !has_any_legal_move(&next) {
            counts.checkmates += 1;
        }
    }
}
