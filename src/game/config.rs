//! Game configuration: who plays which side and how hard the computer
//! searches.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::game_state::chess_rules::{EASY_SEARCH_DEPTH, HARD_SEARCH_DEPTH, MEDIUM_SEARCH_DEPTH};
use crate::game_state::chess_types::Color;

/// Pause before the computer's move is searched, so replies do not appear
/// instantly.
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Plies searched below each root move.
    #[inline]
    pub const fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => EASY_SEARCH_DEPTH,
            Difficulty::Medium => MEDIUM_SEARCH_DEPTH,
            Difficulty::Hard => HARD_SEARCH_DEPTH,
        }
    }

    /// Easy -> Medium -> Hard -> Easy.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(text)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "2" => Ok(Difficulty::Easy),
            "medium" | "3" => Ok(Difficulty::Medium),
            "hard" | "4" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, medium or hard)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    HumanVsHuman,
    HumanVsComputer { computer: Color },
    ComputerVsComputer,
}

impl GameMode {
    #[inline]
    pub fn is_computer(self, color: Color) -> bool {
        match self {
            GameMode::HumanVsHuman => false,
            GameMode::HumanVsComputer { computer } => computer == color,
            GameMode::ComputerVsComputer => true,
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::HumanVsComputer {
            computer: Color::Black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub thinking_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            thinking_delay: DEFAULT_THINKING_DELAY,
        }
    }
}
