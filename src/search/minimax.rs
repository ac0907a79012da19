//! Depth-limited minimax with alpha-beta pruning.
//!
//! White maximises, black minimises. Scores come from a [`BoardScorer`]
//! (material by default). A node without legal moves is scored statically
//! like a leaf, so mates are only preferred when they also win material.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game::config::Difficulty;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};

/// Bound used for the root window; no evaluation reaches it.
pub const SCORE_INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub mv: Move,
    pub score: i32,
    pub nodes: u64,
    pub depth: u8,
}

/// Minimax value of `position` searched `depth` plies deep with the
/// material scorer. `maximizing` must be true exactly when the side to move
/// is white; debug builds assert it.
pub fn minimax(position: &Position, depth: u8, alpha: i32, beta: i32, maximizing: bool) -> i32 {
    Searcher::new(&MaterialScorer).search(position, depth, alpha, beta, maximizing)
}

/// Picks a move for the side to move at the depth bound to `difficulty`.
pub fn choose_move(position: &Position, difficulty: Difficulty) -> ChessResult<SearchResult> {
    choose_move_with_scorer(position, difficulty.depth(), &MaterialScorer)
}

/// Like [`choose_move`], but gives up with [`ChessError::SearchStopped`]
/// once `stop_flag` is raised.
pub fn choose_move_with_stop(
    position: &Position,
    difficulty: Difficulty,
    stop_flag: &Arc<AtomicBool>,
) -> ChessResult<SearchResult> {
    search_root(position, difficulty.depth(), &MaterialScorer, Some(stop_flag))
}

/// Scores every legal root move with `depth` further plies and keeps the
/// best one for the mover; ties go to the earliest generated move.
pub fn choose_move_with_scorer<S: BoardScorer>(
    position: &Position,
    depth: u8,
    scorer: &S,
) -> ChessResult<SearchResult> {
    search_root(position, depth, scorer, None)
}

fn search_root<S: BoardScorer>(
    position: &Position,
    depth: u8,
    scorer: &S,
    stop_flag: Option<&Arc<AtomicBool>>,
) -> ChessResult<SearchResult> {
    let started = Instant::now();
    let mover = position.side_to_move();
    let moves = all_legal_moves(position);
    if moves.is_empty() {
        return Err(ChessError::NoLegalMoves);
    }

    let mut searcher = Searcher::new(scorer);
    searcher.stop_flag = stop_flag;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        let after = apply_move(position, &mv);
        let maximizing = after.side_to_move() == Color::White;
        let score = searcher.search(&after, depth, -SCORE_INFINITY, SCORE_INFINITY, maximizing);
        if searcher.stopped {
            debug!(side = %mover, depth, nodes = searcher.nodes, "search stopped");
            return Err(ChessError::SearchStopped);
        }

        let improves = match best {
            None => true,
            Some((_, best_score)) => match mover {
                Color::White => score > best_score,
                Color::Black => score < best_score,
            },
        };
        if improves {
            best = Some((mv, score));
        }
    }

    let (mv, score) = best.ok_or(ChessError::NoLegalMoves)?;
    debug!(
        side = %mover,
        depth,
        best = %mv,
        score,
        nodes = searcher.nodes,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search complete"
    );

    Ok(SearchResult {
        mv,
        score,
        nodes: searcher.nodes,
        depth,
    })
}

struct Searcher<'a, S: BoardScorer + ?Sized> {
    scorer: &'a S,
    nodes: u64,
    stop_flag: Option<&'a Arc<AtomicBool>>,
    stopped: bool,
}

impl<'a, S: BoardScorer + ?Sized> Searcher<'a, S> {
    fn new(scorer: &'a S) -> Self {
        Self {
            scorer,
            nodes: 0,
            stop_flag: None,
            stopped: false,
        }
    }

    #[inline]
    fn should_abort(&mut self) -> bool {
        if !self.stopped {
            if let Some(flag) = self.stop_flag {
                self.stopped = flag.load(Ordering::Relaxed);
            }
        }
        self.stopped
    }

    fn search(
        &mut self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        debug_assert_eq!(
            maximizing,
            position.side_to_move() == Color::White,
            "white maximises, black minimises"
        );
        // The value is discarded by the root once stopped.
        if self.should_abort() {
            return 0;
        }
        self.nodes += 1;
        if depth == 0 {
            return self.scorer.score(position);
        }

        let moves = all_legal_moves(position);
        if moves.is_empty() {
            return self.scorer.score(position);
        }

        if maximizing {
            let mut best = -SCORE_INFINITY;
            for mv in &moves {
                let score = self.search(&apply_move(position, mv), depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = SCORE_INFINITY;
            for mv in &moves {
                let score = self.search(&apply_move(position, mv), depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
