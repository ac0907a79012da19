use crate::engines::engine_trait::Engine;
use crate::errors::ChessResult;
use crate::game::config::Difficulty;
use crate::game_state::game_state::Position;
use crate::search::minimax::{choose_move, SearchResult};

/// Material minimax at a fixed difficulty.
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    difficulty: Difficulty,
    name: String,
}

impl MinimaxEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            name: format!("Minimax ({difficulty})"),
        }
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        *self = Self::new(difficulty);
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, position: &Position) -> ChessResult<SearchResult> {
        choose_move(position, self.difficulty)
    }
}
