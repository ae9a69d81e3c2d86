//! Finished-match records and per-player statistics
//!
//! The search core never stores anything itself. When a match ends the
//! application builds a [`MatchRecord`], adds it to the [`Scoreboard`] and
//! appends it to a [`HistoryFile`], one JSON object per line, so statistics
//! survive restarts.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, Move, Stone};
use crate::error::{GomokuError, Result};
use crate::rules::Outcome;

/// `winner` value of a drawn match
pub const DRAW: &str = "draw";
/// Name used for the AI opponent
pub const COMPUTER_NAME: &str = "Computer";
/// Default size of a history listing
pub const DEFAULT_LISTING_LIMIT: usize = 50;
/// History file name inside the data directory
pub const HISTORY_FILE: &str = "history.jsonl";

/// Who played the second seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans on one board
    Human,
    /// Human against the computer
    #[default]
    Ai,
}

/// Trimmed player name, or `fallback` when nothing is left
pub fn player_name(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One finished match. Player 1 plays Black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub player1: String,
    pub player2: String,
    pub mode: GameMode,
    /// Winning player's name or [`DRAW`]
    pub winner: String,
    pub total_moves: usize,
    #[serde(default)]
    pub moves: Vec<Move>,
    /// Final board, one text row per board row
    #[serde(default)]
    pub board_state: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(
        player1: &str,
        player2: &str,
        mode: GameMode,
        outcome: Outcome,
        moves: Vec<Move>,
        board: &Board,
    ) -> Self {
        let player1 = player_name(player1, "Player 1");
        let player2 = match mode {
            GameMode::Ai => COMPUTER_NAME.to_string(),
            GameMode::Human => player_name(player2, "Player 2"),
        };
        let winner = match outcome {
            Outcome::Win(Stone::Black) => player1.clone(),
            Outcome::Win(Stone::White) => player2.clone(),
            Outcome::Win(Stone::Empty) | Outcome::Draw => DRAW.to_string(),
        };
        Self {
            player1,
            player2,
            mode,
            winner,
            total_moves: moves.len(),
            moves,
            board_state: board.rows(),
            created_at: Utc::now(),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner == DRAW
    }

    pub fn involves(&self, name: &str) -> bool {
        self.player1 == name || self.player2 == name
    }

    /// Single-line JSON, the history file format
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| GomokuError::invalid(format!("cannot serialize match: {e}")))
    }

    /// Parse a record, rejecting ones without players or a winner
    pub fn from_json(json: &str) -> Result<Self> {
        let record: MatchRecord = serde_json::from_str(json)
            .map_err(|e| GomokuError::invalid(format!("bad match record: {e}")))?;
        if record.player1.trim().is_empty()
            || record.player2.trim().is_empty()
            || record.winner.trim().is_empty()
        {
            return Err(GomokuError::invalid("match record is missing required fields"));
        }
        Ok(record)
    }
}

/// Aggregate results for one player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_name: String,
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    /// Percentage, rounded to two decimals
    pub win_rate: f64,
}

/// In-memory match history
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    records: Vec<MatchRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scoreboard over already stored matches
    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    /// Store a finished match, returning its index
    pub fn record(&mut self, record: MatchRecord) -> usize {
        info!(
            player1 = %record.player1,
            player2 = %record.player2,
            winner = %record.winner,
            moves = record.total_moves,
            "match recorded"
        );
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&MatchRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indices of up to `limit` records, newest first
    pub fn recent_indices(&self, limit: usize) -> Vec<usize> {
        // Reverse first so equal timestamps list the later insert first
        let mut indices: Vec<usize> = (0..self.records.len()).rev().collect();
        indices.sort_by(|&a, &b| self.records[b].created_at.cmp(&self.records[a].created_at));
        indices.truncate(limit);
        indices
    }

    /// Up to `limit` records, newest first
    pub fn recent(&self, limit: usize) -> Vec<&MatchRecord> {
        self.recent_indices(limit)
            .into_iter()
            .filter_map(|i| self.get(i))
            .collect()
    }

    pub fn player_stats(&self, name: &str) -> PlayerStats {
        let games: Vec<&MatchRecord> = self.records.iter().filter(|r| r.involves(name)).collect();
        let total_games = games.len();
        let wins = self.records.iter().filter(|r| r.winner == name).count();
        let draws = games.iter().filter(|r| r.is_draw()).count();
        let win_rate = if total_games > 0 {
            (wins as f64 / total_games as f64 * 10_000.0).round() / 100.0
        } else {
            0.0
        };
        PlayerStats {
            player_name: name.to_string(),
            total_games,
            wins,
            losses: total_games.saturating_sub(wins + draws),
            draws,
            win_rate,
        }
    }
}

/// Match history on disk, one [`MatchRecord`] per line.
///
/// The file is only ever appended to; a torn last line is skipped on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.gomoku/history.jsonl`
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| GomokuError::storage("could not determine home directory"))?;
        Ok(Self::new(home.join(".gomoku").join(HISTORY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored match. A missing file is an empty history.
    pub fn load(&self) -> Result<Scoreboard> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Scoreboard::new()),
            Err(e) => return Err(self.io_error("read", &e)),
        };

        let mut records = Vec::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match MatchRecord::from_json(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = n + 1, error = %e, "skipping unreadable history line"),
            }
        }
        debug!(path = %self.path.display(), matches = records.len(), "history loaded");
        Ok(Scoreboard::from_records(records))
    }

    /// Append one finished match
    pub fn append(&self, record: &MatchRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error("create", &e))?;
        }
        let mut line = record.to_json()?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error("open", &e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| self.io_error("write", &e))
    }

    fn io_error(&self, action: &str, err: &io::Error) -> GomokuError {
        GomokuError::storage(format!("cannot {action} {}: {err}", self.path.display()))
    }
}
