//! Engine abstraction used by the controller's callers, the self-play
//! harness and the terminal driver.

use crate::errors::ChessResult;
use crate::game_state::game_state::Position;
use crate::search::minimax::SearchResult;

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Called before the first move of every game.
    fn new_game(&mut self) {}

    fn choose_move(&mut self, position: &Position) -> ChessResult<SearchResult>;
}
