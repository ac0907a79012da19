//! Single owner of a game in progress.
//!
//! The controller holds the configuration, the current position, the move
//! record and any suspended promotion. The computer's turn runs on a worker
//! thread: it waits out the thinking delay, searches a snapshot of the
//! position and sends the result back over a channel tagged with the epoch
//! it was started in. `reset` bumps the epoch, raises the search's stop flag
//! and drops the channel, so an abandoned worker exits early and its result
//! is never applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game::config::{Difficulty, GameConfig, GameMode};
use crate::game_state::chess_types::*;
use crate::game_state::game_record::GameRecord;
use crate::game_state::game_state::Position;
use crate::game_state::game_status::{classify, GameStatus};
use crate::move_generation::legal_move_apply::{self, apply_move, MoveOutcome};
use crate::move_generation::legal_move_generator;
use crate::search::minimax::{choose_move_with_stop, SearchResult};

/// A move the controller has committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedTurn {
    pub played: Move,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved(PlayedTurn),
    /// The move needs a promotion piece; call
    /// [`GameController::complete_promotion`] or
    /// [`GameController::cancel_promotion`].
    PromotionRequired { from: Square, to: Square },
}

/// A computer move that has been applied to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    pub turn: PlayedTurn,
    pub search: SearchResult,
}

struct SearchMessage {
    epoch: u64,
    result: ChessResult<SearchResult>,
}

struct PendingSearch {
    epoch: u64,
    receiver: Receiver<SearchMessage>,
    stop_signal: Arc<AtomicBool>,
}

pub struct GameController {
    config: GameConfig,
    initial: Position,
    position: Position,
    record: GameRecord,
    status: GameStatus,
    pending_promotion: Option<(Square, Square)>,
    pending_search: Option<PendingSearch>,
    epoch: u64,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self::from_position(config, Position::new_game())
    }

    /// Starts from `initial` instead of the standard arrangement. `reset`
    /// returns to this position.
    pub fn from_position(config: GameConfig, initial: Position) -> Self {
        let status = classify(&initial);
        info!(
            mode = ?config.mode,
            difficulty = %config.difficulty,
            fen = %initial.get_fen(),
            "new game"
        );
        Self {
            config,
            position: initial.clone(),
            initial,
            record: GameRecord::new(),
            status,
            pending_promotion: None,
            pending_search: None,
            epoch: 0,
        }
    }

    /// Back to the initial position. Any outstanding search is abandoned.
    pub fn reset(&mut self) {
        self.abandon_search();
        self.position = self.initial.clone();
        self.record = GameRecord::new();
        self.status = classify(&self.position);
        self.pending_promotion = None;
        info!(epoch = self.epoch, "game reset");
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        info!(%difficulty, "difficulty changed");
    }

    /// Advances easy -> medium -> hard -> easy and returns the new level.
    pub fn cycle_difficulty(&mut self) -> Difficulty {
        let next = self.config.difficulty.next();
        self.set_difficulty(next);
        next
    }

    /// Changing who plays which side abandons any outstanding search.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.abandon_search();
        self.config.mode = mode;
        info!(?mode, "game mode changed");
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Position the game started from and `reset` returns to.
    #[inline]
    pub fn initial_position(&self) -> &Position {
        &self.initial
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<(Square, Square)> {
        self.pending_promotion
    }

    #[inline]
    pub fn is_search_pending(&self) -> bool {
        self.pending_search.is_some()
    }

    /// Pieces of `color` captured so far.
    pub fn captured_pieces(&self, color: Color) -> Vec<Piece> {
        self.record.captured_pieces_of(color)
    }

    /// Legal destinations for the piece on `square`; empty once the game is
    /// over.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        legal_move_generator::legal_moves(&self.position, square)
    }

    /// Human move request.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> ChessResult<TurnOutcome> {
        self.ensure_accepting_moves()?;
        if self.pending_search.is_some() {
            return Err(ChessError::SearchPending);
        }
        let to_move = self.position.side_to_move();
        if self.config.mode.is_computer(to_move) {
            return Err(ChessError::ComputerToMove(to_move));
        }

        match legal_move_apply::attempt_move(&self.position, from, to, None)? {
            MoveOutcome::Completed(applied) => Ok(TurnOutcome::Moved(self.commit(applied.played))),
            MoveOutcome::PromotionRequired { from, to } => {
                debug!(%from, %to, "promotion choice required");
                self.pending_promotion = Some((from, to));
                Ok(TurnOutcome::PromotionRequired { from, to })
            }
        }
    }

    /// Finishes a suspended promotion with `kind`. An invalid kind leaves
    /// the promotion pending.
    pub fn complete_promotion(&mut self, kind: PieceKind) -> ChessResult<PlayedTurn> {
        let (from, to) = self.pending_promotion.ok_or(ChessError::NoPendingPromotion)?;

        match legal_move_apply::attempt_move(&self.position, from, to, Some(kind))? {
            MoveOutcome::Completed(applied) => {
                self.pending_promotion = None;
                Ok(self.commit(applied.played))
            }
            MoveOutcome::PromotionRequired { .. } => Err(ChessError::InvalidPromotion(kind)),
        }
    }

    pub fn cancel_promotion(&mut self) -> ChessResult<()> {
        self.pending_promotion
            .take()
            .map(|_| ())
            .ok_or(ChessError::NoPendingPromotion)
    }

    /// True when the side to move is played by the computer and the game can
    /// continue.
    pub fn is_computer_turn(&self) -> bool {
        !self.status.is_terminal()
            && self.pending_promotion.is_none()
            && self.config.mode.is_computer(self.position.side_to_move())
    }

    /// Starts the background search for the computer's move.
    pub fn request_computer_move(&mut self) -> ChessResult<()> {
        if self.status.is_terminal() {
            return Err(ChessError::GameOver(self.status));
        }
        if self.pending_search.is_some() {
            return Err(ChessError::SearchPending);
        }
        if !self.is_computer_turn() {
            return Err(ChessError::NotComputerTurn);
        }

        let (sender, receiver) = mpsc::channel();
        let snapshot = self.position.clone();
        let difficulty = self.config.difficulty;
        let delay = self.config.thinking_delay;
        let epoch = self.epoch;
        let stop_signal = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop_signal);

        info!(epoch, %difficulty, side = %snapshot.side_to_move(), "computer search requested");
        thread::spawn(move || {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            if stop_flag.load(Ordering::Relaxed) {
                return;
            }
            let result = choose_move_with_stop(&snapshot, difficulty, &stop_flag);
            // The receiver is gone when the game was reset meanwhile.
            let _ = sender.send(SearchMessage { epoch, result });
        });

        self.pending_search = Some(PendingSearch {
            epoch,
            receiver,
            stop_signal,
        });
        Ok(())
    }

    /// Applies the computer's move if its search has finished. Returns
    /// `Ok(None)` while it is still running or when nothing is pending.
    pub fn poll_computer_move(&mut self) -> ChessResult<Option<ComputerTurn>> {
        let Some(pending) = &self.pending_search else {
            return Ok(None);
        };
        match pending.receiver.try_recv() {
            Ok(message) => self.finish_search(message),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                warn!("search worker exited without a result");
                self.pending_search = None;
                Ok(None)
            }
        }
    }

    /// Blocks until the pending search finishes or `timeout` elapses.
    pub fn wait_for_computer_move(&mut self, timeout: Duration) -> ChessResult<Option<ComputerTurn>> {
        let Some(pending) = &self.pending_search else {
            return Ok(None);
        };
        match pending.receiver.recv_timeout(timeout) {
            Ok(message) => self.finish_search(message),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                warn!("search worker exited without a result");
                self.pending_search = None;
                Ok(None)
            }
        }
    }

    fn finish_search(&mut self, message: SearchMessage) -> ChessResult<Option<ComputerTurn>> {
        let pending_epoch = self.pending_search.take().map(|pending| pending.epoch);
        if pending_epoch != Some(self.epoch) || message.epoch != self.epoch {
            info!(
                result_epoch = message.epoch,
                current_epoch = self.epoch,
                "discarding stale search result"
            );
            return Ok(None);
        }

        let search = message.result?;
        Ok(Some(ComputerTurn {
            turn: self.commit(search.mv),
            search,
        }))
    }

    fn abandon_search(&mut self) {
        self.epoch += 1;
        if let Some(pending) = self.pending_search.take() {
            pending.stop_signal.store(true, Ordering::Relaxed);
            debug!(epoch = self.epoch, "outstanding search abandoned");
        }
    }

    fn ensure_accepting_moves(&self) -> ChessResult<()> {
        if self.status.is_terminal() {
            return Err(ChessError::GameOver(self.status));
        }
        if let Some((from, to)) = self.pending_promotion {
            return Err(ChessError::PromotionPending { from, to });
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move) -> PlayedTurn {
        self.position = apply_move(&self.position, &mv);
        self.record.push(mv);
        self.status = classify(&self.position);

        info!(
            ply = self.record.len(),
            side = %mv.moving_piece.color,
            mv = %mv,
            status = %self.status,
            "move played"
        );
        if self.status.is_terminal() {
            info!(status = %self.status, "game over");
        }

        PlayedTurn {
            played: mv,
            status: self.status,
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    const WAIT: Duration = Duration::from_secs(30);

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn config(mode: GameMode, delay_ms: u64) -> GameConfig {
        GameConfig {
            mode,
            difficulty: Difficulty::Easy,
            thinking_delay: Duration::from_millis(delay_ms),
        }
    }

    fn two_player() -> GameController {
        GameController::new(config(GameMode::HumanVsHuman, 0))
    }

    fn moved(outcome: TurnOutcome) -> PlayedTurn {
        match outcome {
            TurnOutcome::Moved(turn) => turn,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn human_moves_are_recorded_and_illegal_ones_leave_state_alone() {
        let mut game = two_player();
        let turn = moved(game.attempt_move(sq("e2"), sq("e4")).expect("e2e4 is legal"));
        assert_eq!(turn.played.to_string(), "e2e4");
        assert_eq!(game.record().len(), 1);

        let before = game.position().clone();
        assert_eq!(
            game.attempt_move(sq("e7"), sq("e4")),
            Err(ChessError::IllegalMove {
                from: sq("e7"),
                to: sq("e4")
            })
        );
        assert_eq!(game.position(), &before);
        assert_eq!(game.record().len(), 1);
    }

    #[test]
    fn promotion_suspends_until_a_piece_is_chosen() {
        let initial =
            Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut game = GameController::from_position(config(GameMode::HumanVsHuman, 0), initial);

        let outcome = game.attempt_move(sq("b7"), sq("b8")).expect("push is legal");
        assert_eq!(
            outcome,
            TurnOutcome::PromotionRequired {
                from: sq("b7"),
                to: sq("b8")
            }
        );
        assert!(game.position().is_empty(sq("b8")));
        assert_eq!(
            game.attempt_move(sq("e1"), sq("e2")),
            Err(ChessError::PromotionPending {
                from: sq("b7"),
                to: sq("b8")
            })
        );

        assert_eq!(
            game.complete_promotion(PieceKind::Pawn),
            Err(ChessError::InvalidPromotion(PieceKind::Pawn))
        );
        assert!(game.pending_promotion().is_some());

        let turn = game.complete_promotion(PieceKind::Queen).expect("queen is a valid choice");
        assert_eq!(turn.played.promotion_piece, Some(PieceKind::Queen));
        assert_eq!(turn.status, GameStatus::Check);
        assert_eq!(
            game.position().piece_at(sq("b8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(game.complete_promotion(PieceKind::Queen), Err(ChessError::NoPendingPromotion));
    }

    #[test]
    fn cancelled_promotion_keeps_the_side_to_move() {
        let initial =
            Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut game = GameController::from_position(config(GameMode::HumanVsHuman, 0), initial);
        game.attempt_move(sq("b7"), sq("b8")).expect("push is legal");
        game.cancel_promotion().expect("promotion was pending");
        assert_eq!(game.position().side_to_move(), Color::White);
        assert_eq!(game.cancel_promotion(), Err(ChessError::NoPendingPromotion));
        moved(game.attempt_move(sq("e1"), sq("d1")).expect("king step is legal"));
    }

    #[test]
    fn finished_game_blocks_further_moves() {
        let mut game = two_player();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            moved(game.attempt_move(sq(from), sq(to)).expect("move is legal"));
        }
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(
            game.attempt_move(sq("a2"), sq("a3")),
            Err(ChessError::GameOver(GameStatus::Checkmate))
        );
        assert!(game.legal_moves(sq("a2")).is_empty());

        game.reset();
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.record().is_empty());
        assert_eq!(game.legal_moves(sq("a2")).len(), 2);
    }

    #[test]
    fn computer_replies_to_a_human_move() {
        let mut game = GameController::new(config(
            GameMode::HumanVsComputer {
                computer: Color::Black,
            },
            0,
        ));
        assert!(!game.is_computer_turn());
        assert_eq!(game.request_computer_move(), Err(ChessError::NotComputerTurn));

        moved(game.attempt_move(sq("e2"), sq("e4")).expect("e2e4 is legal"));
        assert!(game.is_computer_turn());
        assert_eq!(
            game.attempt_move(sq("e7"), sq("e5")),
            Err(ChessError::ComputerToMove(Color::Black))
        );

        game.request_computer_move().expect("search should start");
        let reply = game
            .wait_for_computer_move(WAIT)
            .expect("search should succeed")
            .expect("search should finish");
        assert_eq!(reply.turn.played.moving_piece.color, Color::Black);
        assert_eq!(reply.search.depth, Difficulty::Easy.depth());
        assert_eq!(game.record().len(), 2);
        assert_eq!(game.position().side_to_move(), Color::White);
        assert!(!game.is_search_pending());
    }

    #[test]
    fn human_move_is_rejected_while_search_is_pending() {
        let mut game = GameController::new(config(
            GameMode::HumanVsComputer {
                computer: Color::White,
            },
            200,
        ));
        game.request_computer_move().expect("search should start");
        assert_eq!(game.request_computer_move(), Err(ChessError::SearchPending));
        assert_eq!(
            game.attempt_move(sq("e2"), sq("e4")),
            Err(ChessError::SearchPending)
        );
        assert_eq!(game.poll_computer_move(), Ok(None));

        let reply = game
            .wait_for_computer_move(WAIT)
            .expect("search should succeed")
            .expect("search should finish");
        assert_eq!(reply.turn.played.moving_piece.color, Color::White);
    }

    #[test]
    fn reset_discards_the_outstanding_search() {
        let mut game = GameController::new(config(GameMode::ComputerVsComputer, 50));
        game.request_computer_move().expect("search should start");
        game.reset();
        assert!(!game.is_search_pending());

        thread::sleep(Duration::from_millis(200));
        assert_eq!(game.poll_computer_move(), Ok(None));
        assert_eq!(game.position(), &Position::new_game());
        assert!(game.record().is_empty());
    }

    #[test]
    fn reset_stops_the_abandoned_worker() {
        let mut game = GameController::new(config(GameMode::ComputerVsComputer, 0));
        game.set_difficulty(Difficulty::Hard);

        let mut stop_flags = Vec::new();
        for _ in 0..4 {
            game.request_computer_move().expect("search should start");
            let pending = game.pending_search.as_ref().expect("search should be pending");
            stop_flags.push(Arc::clone(&pending.stop_signal));
            game.reset();
        }

        // Each worker drops its clone of the flag when it exits.
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        while stop_flags.iter().any(|flag| Arc::strong_count(flag) > 1) {
            assert!(
                std::time::Instant::now() < deadline,
                "abandoned searches are still running"
            );
            thread::sleep(Duration::from_millis(10));
        }
        assert!(stop_flags.iter().all(|flag| flag.load(Ordering::Relaxed)));
        assert!(!game.is_search_pending());
    }

    #[test]
    fn result_from_an_older_epoch_is_not_applied() {
        let mut game = GameController::new(config(GameMode::ComputerVsComputer, 0));
        game.request_computer_move().expect("search should start");
        // Simulate a reset racing the worker without dropping its channel.
        game.epoch += 1;

        assert_eq!(game.wait_for_computer_move(WAIT), Ok(None));
        assert!(game.record().is_empty());
        assert!(!game.is_search_pending());
    }

    #[test]
    fn difficulty_cycles_and_mode_change_abandons_search() {
        let mut game = GameController::new(config(GameMode::ComputerVsComputer, 500));
        assert_eq!(game.cycle_difficulty(), Difficulty::Medium);
        assert_eq!(game.cycle_difficulty(), Difficulty::Hard);
        assert_eq!(game.cycle_difficulty(), Difficulty::Easy);

        game.request_computer_move().expect("search should start");
        game.set_mode(GameMode::HumanVsHuman);
        assert!(!game.is_search_pending());
        assert!(!game.is_computer_turn());
        moved(game.attempt_move(sq("d2"), sq("d4")).expect("d2d4 is legal"));
    }
}
