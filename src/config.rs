//! Game configuration: board geometry, difficulty table and the search budget
//!
//! A [`GameConfig`] is an immutable value passed into every core call. There
//! are no process-wide settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{BOARD_SIZE, MAX_BOARD_SIZE};
use crate::error::{GomokuError, Result};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Board geometry and the winning run length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub board_size: usize,
    pub win_length: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            win_length: WIN_LENGTH,
        }
    }
}

/// AI strength setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Resolve a difficulty name, falling back to `Medium` for anything unknown
    pub fn from_name(name: &str) -> Difficulty {
        name.parse().unwrap_or_else(|_| {
            warn!(name, "unknown difficulty, using medium");
            Difficulty::Medium
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GomokuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GomokuError::invalid(format!("unknown difficulty {other:?}"))),
        }
    }
}

/// Search depth and the number of root moves that get searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub depth: u8,
    pub root_moves: usize,
}

impl SearchLimits {
    pub const fn new(depth: u8, root_moves: usize) -> Self {
        Self { depth, root_moves }
    }
}

/// Per-difficulty search limits.
///
/// Harder levels search deeper but look at fewer root moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: SearchLimits,
    pub medium: SearchLimits,
    pub hard: SearchLimits,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: SearchLimits::new(3, 15),
            medium: SearchLimits::new(5, 12),
            hard: SearchLimits::new(7, 10),
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> SearchLimits {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Complete configuration for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rules: Rules,
    pub difficulties: DifficultyTable,
    /// Soft time budget per AI move in milliseconds.
    /// Stored and reported only; the search always runs to completion.
    pub time_limit_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            difficulties: DifficultyTable::default(),
            time_limit_ms: 1200,
        }
    }
}

impl GameConfig {
    /// Search limits for a difficulty
    pub fn limits(&self, difficulty: Difficulty) -> SearchLimits {
        self.difficulties.get(difficulty)
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| GomokuError::invalid(format!("bad config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GomokuError::invalid(format!("cannot serialize config: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        let Rules {
            board_size,
            win_length,
        } = self.rules;
        if board_size == 0 || board_size > MAX_BOARD_SIZE {
            return Err(GomokuError::invalid(format!(
                "board size {board_size} is out of range"
            )));
        }
        if win_length == 0 || win_length > board_size {
            return Err(GomokuError::invalid(format!(
                "win length {win_length} does not fit a {board_size}x{board_size} board"
            )));
        }
        for difficulty in Difficulty::ALL {
            let limits = self.limits(difficulty);
            if limits.depth == 0 || limits.root_moves == 0 {
                return Err(GomokuError::invalid(format!(
                    "{difficulty} needs a depth and root move cap of at least 1"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let config = GameConfig::default();
        assert_eq!(config.limits(Difficulty::Easy), SearchLimits::new(3, 15));
        assert_eq!(config.limits(Difficulty::Medium), SearchLimits::new(5, 12));
        assert_eq!(config.limits(Difficulty::Hard), SearchLimits::new(7, 10));
        assert_eq!(config.rules, Rules { board_size: 10, win_length: 5 });
        assert_eq!(config.time_limit_ms, 1200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deeper_is_narrower() {
        let table = DifficultyTable::default();
        let levels: Vec<SearchLimits> = Difficulty::ALL.iter().map(|d| table.get(*d)).collect();
        for pair in levels.windows(2) {
            assert!(pair[0].depth < pair[1].depth);
            assert!(pair[0].root_moves > pair[1].root_moves);
        }
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("nightmare".parse::<Difficulty>().is_err());

        assert_eq!(Difficulty::from_name("Medium"), Difficulty::Medium);
        assert_eq!(Difficulty::from_name("nightmare"), Difficulty::Medium);
        assert_eq!(Difficulty::from_name(""), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_json_partial() {
        let config = GameConfig::from_json_str(r#"{"time_limit_ms": 500}"#).unwrap();
        assert_eq!(config.time_limit_ms, 500);
        assert_eq!(config.rules, Rules::default());

        let config =
            GameConfig::from_json_str(r#"{"rules": {"board_size": 15, "win_length": 5}}"#)
                .unwrap();
        assert_eq!(config.rules.board_size, 15);
    }

    #[test]
    fn test_json_rejects_invalid() {
        assert!(GameConfig::from_json_str("not json").is_err());
        assert!(GameConfig::from_json_str(r#"{"rules": {"board_size": 4, "win_length": 5}}"#)
            .is_err());
        assert!(GameConfig::from_json_str(r#"{"rules": {"board_size": 0, "win_length": 0}}"#)
            .is_err());

        let mut config = GameConfig::default();
        config.difficulties.hard.depth = 0;
        assert!(config.validate().is_err());
    }
}
