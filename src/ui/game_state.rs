//! Game state management for the Gomoku GUI
//!
//! Player 1 plays Black and moves first. Against the computer, the AI plays
//! White. The AI turn is deferred by one frame so the board with the human's
//! stone gets drawn, then runs to completion on a worker thread.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::{Difficulty, GameConfig};
use crate::error::Result;
use crate::record::{player_name, GameMode, MatchRecord, COMPUTER_NAME};
use crate::rules::{has_win_through, is_full, winning_line, Outcome};
use crate::{AIEngine, Board, Move, MoveResult, Pos, Stone};

/// Side the computer plays
pub const AI_STONE: Stone = Stone::White;

/// Chosen before a match starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSettings {
    pub mode: GameMode,
    pub player1: String,
    pub player2: String,
    pub difficulty: Difficulty,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::Ai,
            player1: String::new(),
            player2: String::new(),
            difficulty: Difficulty::Medium,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    /// AI to move; the search starts on the next frame
    Pending,
    Thinking {
        receiver: Receiver<Result<MoveResult>>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub settings: MatchSettings,
    pub config: GameConfig,
    pub current_turn: Stone,
    pub outcome: Option<Outcome>,
    /// Cells to highlight once someone has won
    pub winning_line: Vec<Pos>,
    pub last_move: Option<Pos>,
    pub moves: Vec<Move>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    /// Record of the finished match, waiting to be collected
    finished: Option<MatchRecord>,
}

impl GameState {
    /// New match. An invalid configuration is replaced by the default one.
    pub fn new(settings: MatchSettings, config: GameConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "invalid configuration, using defaults");
                GameConfig::default()
            }
        };
        Self {
            board: Board::with_size(config.rules.board_size).unwrap_or_default(),
            settings,
            config,
            current_turn: Stone::Black,
            outcome: None,
            winning_line: Vec::new(),
            last_move: None,
            moves: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            message: None,
            finished: None,
        }
    }

    /// Start over with the same settings
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone(), self.config.clone());
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        self.settings.mode == GameMode::Ai && self.current_turn == AI_STONE
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        !self.is_ai_turn()
    }

    /// Check if AI is currently thinking (or about to)
    pub fn is_ai_thinking(&self) -> bool {
        !matches!(self.ai_state, AiState::Idle)
    }

    /// Name of whoever plays `stone`
    pub fn player_for(&self, stone: Stone) -> String {
        let (p1, p2) = self.display_names();
        match stone {
            Stone::White => p2,
            _ => p1,
        }
    }

    fn display_names(&self) -> (String, String) {
        let p1 = player_name(&self.settings.player1, "Player 1");
        let p2 = match self.settings.mode {
            GameMode::Ai => COMPUTER_NAME.to_string(),
            GameMode::Human => player_name(&self.settings.player2, "Player 2"),
        };
        (p1, p2)
    }

    /// Attempt to place a stone for the human player
    pub fn try_place_stone(&mut self, pos: Pos) -> std::result::Result<(), String> {
        if self.is_game_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        self.execute_move(pos).map_err(|e| e.to_string())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) -> Result<()> {
        let color = self.current_turn;
        self.board.place(pos, color)?;

        self.moves.push(Move::new(pos, color));
        self.last_move = Some(pos);
        self.move_timer.stop();
        self.message = None;

        let rules = self.config.rules;
        if has_win_through(&self.board, pos, color, &rules) {
            self.winning_line = winning_line(&self.board, pos, color, &rules);
            self.finish(Outcome::Win(color));
            return Ok(());
        }
        if is_full(&self.board) {
            self.finish(Outcome::Draw);
            return Ok(());
        }

        self.current_turn = color.opponent();
        self.move_timer.start();
        if self.is_ai_turn() {
            self.ai_state = AiState::Pending;
        }
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        let record = MatchRecord::new(
            &self.settings.player1,
            &self.settings.player2,
            self.settings.mode,
            outcome,
            self.moves.clone(),
            &self.board,
        );
        info!(winner = %record.winner, moves = record.total_moves, "match finished");
        self.finished = Some(record);
    }

    /// Hand over the finished match record, once
    pub fn take_finished_record(&mut self) -> Option<MatchRecord> {
        self.finished.take()
    }

    /// Advance the AI turn by one frame.
    ///
    /// `Pending` becomes `Thinking` (the worker is spawned); a finished worker
    /// has its move played.
    pub fn tick(&mut self) {
        match &self.ai_state {
            AiState::Idle => {}
            AiState::Pending => self.start_ai_thinking(),
            AiState::Thinking { .. } => self.check_ai_result(),
        }
    }

    /// Spawn the search on a worker thread
    fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_game_over() {
            self.ai_state = AiState::Idle;
            return;
        }

        let board = self.board.clone();
        let config = self.config.clone();
        let difficulty = self.settings.difficulty;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = AIEngine::with_config(config)
                .and_then(|mut engine| engine.choose_move_with_stats(&board, AI_STONE, difficulty));
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    fn check_ai_result(&mut self) {
        let received = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some(Some((result, start_time.elapsed()))),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(None),
            },
            _ => None,
        };

        let Some(received) = received else {
            return;
        };
        self.ai_state = AiState::Idle;
        let Some((result, elapsed)) = received else {
            warn!("AI worker exited without a result");
            self.message = Some("AI error".to_string());
            return;
        };
        self.move_timer.set_ai_time(elapsed);

        match result {
            Ok(move_result) => {
                let pos = move_result.best_move;
                self.last_ai_result = Some(move_result);
                if let Err(e) = self.execute_move(pos) {
                    warn!(error = %e, "AI move rejected");
                    self.message = Some(e.to_string());
                }
            }
            Err(e) => {
                warn!(error = %e, "AI could not move");
                self.message = Some(e.to_string());
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_game() -> GameState {
        let settings = MatchSettings {
            mode: GameMode::Human,
            player1: "Alice".to_string(),
            player2: "Bob".to_string(),
            difficulty: Difficulty::Easy,
        };
        GameState::new(settings, GameConfig::default())
    }

    fn ai_game() -> GameState {
        let settings = MatchSettings {
            difficulty: Difficulty::Easy,
            ..MatchSettings::default()
        };
        GameState::new(settings, GameConfig::default())
    }

    fn wait_for_ai(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(120);
        while state.is_ai_thinking() && Instant::now() < deadline {
            state.tick();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_human_game_alternates() {
        let mut state = human_game();
        state.try_place_stone(Pos::new(5, 5)).unwrap();
        assert_eq!(state.current_turn, Stone::White);
        assert!(!state.is_ai_thinking());
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        assert_eq!(state.current_turn, Stone::Black);
        assert_eq!(state.moves.len(), 2);
        assert!(state.try_place_stone(Pos::new(4, 4)).is_err());
    }

    #[test]
    fn test_human_game_win() {
        let mut state = human_game();
        for c in 0..4 {
            state.try_place_stone(Pos::new(0, c)).unwrap();
            state.try_place_stone(Pos::new(1, c)).unwrap();
        }
        state.try_place_stone(Pos::new(0, 4)).unwrap();

        assert_eq!(state.outcome, Some(Outcome::Win(Stone::Black)));
        assert_eq!(state.winning_line.len(), 5);
        assert!(state.try_place_stone(Pos::new(5, 5)).is_err());

        let record = state.take_finished_record().unwrap();
        assert_eq!(record.winner, "Alice");
        assert_eq!(record.total_moves, 9);
        assert!(state.take_finished_record().is_none());
    }

    #[test]
    fn test_ai_turn_is_deferred() {
        let mut state = ai_game();
        state.try_place_stone(Pos::new(5, 5)).unwrap();
        assert!(state.is_ai_turn());
        assert!(matches!(state.ai_state, AiState::Pending));
        assert!(state.try_place_stone(Pos::new(0, 0)).is_err());

        state.tick();
        assert!(matches!(state.ai_state, AiState::Thinking { .. } | AiState::Idle));

        wait_for_ai(&mut state);
        assert!(!state.is_ai_thinking());
        assert_eq!(state.board.stone_count(), 2);
        assert_eq!(state.current_turn, Stone::Black);
        assert!(state.last_ai_result.is_some());
        assert_eq!(state.player_for(AI_STONE), "Computer");
        assert_eq!(state.player_for(Stone::Black), "Player 1");
    }

    #[test]
    fn test_ai_completes_own_four() {
        let mut state = ai_game();
        state.board = Board::from_rows(&[
            "OOOO......",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "XXX.......",
            "..........",
        ])
        .unwrap();
        state.try_place_stone(Pos::new(9, 9)).unwrap();
        wait_for_ai(&mut state);

        assert_eq!(state.outcome, Some(Outcome::Win(Stone::White)));
        assert_eq!(state.winning_line.first(), Some(&Pos::new(0, 0)));
        let record = state.take_finished_record().unwrap();
        assert_eq!(record.winner, COMPUTER_NAME);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let mut config = GameConfig::default();
        config.rules.board_size = 300;
        let state = GameState::new(MatchSettings::default(), config);
        assert_eq!(state.config, GameConfig::default());
        assert_eq!(state.board.size(), crate::BOARD_SIZE);
    }

    #[test]
    fn test_reset_keeps_settings() {
        let mut state = human_game();
        state.try_place_stone(Pos::new(5, 5)).unwrap();
        state.reset();
        assert!(state.board.is_board_empty());
        assert_eq!(state.settings.player1, "Alice");
        assert_eq!(state.current_turn, Stone::Black);
    }
}
