//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{GameState, MatchSettings};
use super::theme::*;
use crate::config::{Difficulty, GameConfig};
use tracing::warn;

use crate::record::{GameMode, HistoryFile, Scoreboard, DEFAULT_LISTING_LIMIT};
use crate::rules::Outcome;
use crate::Stone;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Setup,
    Game,
    Scoreboard,
}

/// Main Gomoku application
pub struct GomokuApp {
    page: Page,
    settings: MatchSettings,
    config: GameConfig,
    state: GameState,
    board_view: BoardView,
    scoreboard: Scoreboard,
    /// Where finished matches are kept between runs; `None` keeps them in memory
    history: Option<HistoryFile>,
    /// Scoreboard index of the match shown in the details window
    selected_match: Option<usize>,
    /// Player whose statistics are shown on the scoreboard page
    stats_player: String,
    show_debug: bool,
}

impl Default for GomokuApp {
    fn default() -> Self {
        Self::with_config(GameConfig::default(), None)
    }
}

impl GomokuApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: GameConfig,
        history: Option<HistoryFile>,
    ) -> Self {
        Self::with_config(config, history)
    }

    fn with_config(config: GameConfig, history: Option<HistoryFile>) -> Self {
        let settings = MatchSettings::default();
        let scoreboard = match history.as_ref().map(HistoryFile::load) {
            Some(Ok(scoreboard)) => scoreboard,
            Some(Err(e)) => {
                warn!(error = %e, "match history unavailable");
                Scoreboard::new()
            }
            None => Scoreboard::new(),
        };
        Self {
            page: Page::Setup,
            state: GameState::new(settings.clone(), config.clone()),
            settings,
            config,
            board_view: BoardView::default(),
            scoreboard,
            history,
            selected_match: None,
            stats_player: String::new(),
            show_debug: true,
        }
    }

    fn start_match(&mut self) {
        self.state = GameState::new(self.settings.clone(), self.config.clone());
        self.page = Page::Game;
    }

    /// Move a finished match into the scoreboard and the history file
    fn collect_finished(&mut self) {
        let Some(record) = self.state.take_finished_record() else {
            return;
        };
        if self.stats_player.is_empty() {
            self.stats_player = record.player1.clone();
        }
        if let Some(history) = &self.history {
            if let Err(e) = history.append(&record) {
                warn!(error = %e, "match not saved");
                self.state.message = Some(e.to_string());
            }
        }
        self.scoreboard.record(record);
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Match...").clicked() {
                        self.page = Page::Setup;
                        ui.close_menu();
                    }
                    if ui.button("Restart").clicked() {
                        self.state.reset();
                        self.page = Page::Game;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Scoreboard").clicked() {
                        self.page = Page::Scoreboard;
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.settings.mode {
                        GameMode::Ai => {
                            format!("vs Computer ({})", self.state.settings.difficulty)
                        }
                        GameMode::Human => "Two players".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    /// Match setup: mode, names and AI strength
    fn render_setup(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new("GOMOKU").size(32.0).strong().color(TEXT_PRIMARY));
                ui.label(RichText::new("Five in a row").size(12.0).color(TEXT_MUTED));
                ui.add_space(24.0);
            });

            Self::card_frame().show(ui, |ui| {
                ui.label(RichText::new("MODE").size(10.0).color(TEXT_MUTED));
                ui.horizontal(|ui| {
                    ui.radio_value(&mut self.settings.mode, GameMode::Ai, "Against the computer");
                    ui.radio_value(&mut self.settings.mode, GameMode::Human, "Two players");
                });
                ui.add_space(10.0);

                ui.label(RichText::new("PLAYERS").size(10.0).color(TEXT_MUTED));
                ui.horizontal(|ui| {
                    ui.label("Black:");
                    ui.add(egui::TextEdit::singleline(&mut self.settings.player1).hint_text("Player 1"));
                });
                if self.settings.mode == GameMode::Human {
                    ui.horizontal(|ui| {
                        ui.label("White:");
                        ui.add(egui::TextEdit::singleline(&mut self.settings.player2).hint_text("Player 2"));
                    });
                } else {
                    ui.add_space(10.0);
                    ui.label(RichText::new("DIFFICULTY").size(10.0).color(TEXT_MUTED));
                    ui.horizontal(|ui| {
                        for difficulty in Difficulty::ALL {
                            ui.radio_value(&mut self.settings.difficulty, difficulty, difficulty.as_str());
                        }
                    });
                }
                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button(RichText::new("Start").size(14.0).strong()).clicked() {
                        self.start_match();
                    }
                    if ui.button("Scoreboard").clicked() {
                        self.page = Page::Scoreboard;
                    }
                });
            });
        });
    }

    /// Recent matches and per-player statistics
    fn render_scoreboard(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("SCOREBOARD").size(20.0).strong().color(TEXT_PRIMARY));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Back").clicked() {
                        self.page = if self.state.moves.is_empty() { Page::Setup } else { Page::Game };
                    }
                });
            });
            ui.add_space(10.0);

            Self::card_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Player:");
                    ui.text_edit_singleline(&mut self.stats_player);
                });
                let stats = self.scoreboard.player_stats(self.stats_player.trim());
                ui.label(
                    RichText::new(format!(
                        "{} games, {} wins, {} losses, {} draws ({:.2}%)",
                        stats.total_games, stats.wins, stats.losses, stats.draws, stats.win_rate
                    ))
                    .size(12.0)
                    .color(TEXT_SECONDARY),
                );
            });
            ui.add_space(10.0);

            if self.scoreboard.is_empty() {
                ui.label(RichText::new("No matches yet").color(TEXT_MUTED));
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("match_history")
                    .striped(true)
                    .num_columns(6)
                    .show(ui, |ui| {
                        for header in ["When", "Black", "White", "Winner", "Moves", ""] {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for index in self.scoreboard.recent_indices(DEFAULT_LISTING_LIMIT) {
                            let Some(record) = self.scoreboard.get(index) else {
                                continue;
                            };
                            ui.label(record.created_at.format("%Y-%m-%d %H:%M").to_string());
                            ui.label(record.player1.as_str());
                            ui.label(record.player2.as_str());
                            ui.label(record.winner.as_str());
                            ui.label(record.total_moves.to_string());
                            if ui.small_button("Details").clicked() {
                                self.selected_match = Some(index);
                            }
                            ui.end_row();
                        }
                    });
            });
        });

        self.render_match_details(ctx);
    }

    /// Final board and summary of one stored match
    fn render_match_details(&mut self, ctx: &Context) {
        let Some(record) = self.selected_match.and_then(|i| self.scoreboard.get(i)) else {
            return;
        };

        let mut open = true;
        egui::Window::new("Match details")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("{} (Black) vs {} (White)", record.player1, record.player2))
                        .strong()
                        .color(TEXT_PRIMARY),
                );
                let result = if record.is_draw() {
                    "Draw".to_string()
                } else {
                    format!("Winner: {}", record.winner)
                };
                ui.label(RichText::new(result).color(WIN_HIGHLIGHT));
                ui.label(
                    RichText::new(format!(
                        "{} moves, {}",
                        record.total_moves,
                        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                    ))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
                );
                ui.add_space(8.0);
                for row in &record.board_state {
                    ui.label(RichText::new(row.as_str()).monospace().size(14.0));
                }
            });

        if !open {
            self.selected_match = None;
        }
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_turn_card(ui);
                ui.add_space(10.0);
                self.render_timer_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(outcome) = self.state.outcome {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, outcome);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn;
            let is_black = turn == Stone::Black;
            let accent = if is_black {
                egui::Color32::from_rgb(70, 70, 75)
            } else {
                egui::Color32::from_rgb(220, 220, 225)
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(self.state.player_for(turn)).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.is_game_over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        (turn.name(), TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    /// Render timer card
    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let budget = self.config.time_limit_ms as f32 / 1000.0;
                let color = if secs < budget * 0.5 {
                    TIMER_NORMAL
                } else if secs < budget {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Render actions card
    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Restart").clicked() {
                    self.state.reset();
                }
                if ui.button("New Match").clicked() {
                    self.page = Page::Setup;
                }
                if ui.button("Scoreboard").clicked() {
                    self.page = Page::Scoreboard;
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.moves.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Render debug card
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{:?}", result.search_type))
                                .size(11.0)
                                .strong()
                                .color(TIMER_NORMAL),
                        );
                        ui.label(
                            RichText::new(format!("Score: {:.0}", result.score))
                                .size(10.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                let pos = result.best_move;
                let col = char::from(b'A' + pos.col);
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("-> {}{}", col, pos.row))
                        .size(12.0)
                        .strong()
                        .color(WIN_HIGHLIGHT),
                );
            });
    }

    /// Render game over card
    fn render_game_over_card(&mut self, ui: &mut egui::Ui, outcome: Outcome) {
        let headline = match outcome {
            Outcome::Win(stone) => format!("{} wins!", self.state.player_for(stone)),
            Outcome::Draw => "Draw".to_string(),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(12.0);
                    if ui.button(RichText::new("Play again").size(14.0).strong()).clicked() {
                        self.state.reset();
                    }
                });
            });
    }

    /// Render status message card
    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let accepts_input =
                !self.state.is_game_over() && !self.state.is_ai_thinking() && self.state.is_human_turn();

            let clicked = self.board_view.show(
                ui,
                &self.state.board,
                self.state.current_turn,
                self.state.last_move,
                &self.state.winning_line,
                accepts_input,
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|i| {
            // D - Toggle debug panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // N - Restart
            if i.key_pressed(egui::Key::N) && self.page == Page::Game {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // Pending AI turns start here, one frame after the human's stone is drawn
        self.state.tick();
        self.collect_finished();

        self.render_menu_bar(ctx);
        match self.page {
            Page::Setup => self.render_setup(ctx),
            Page::Scoreboard => self.render_scoreboard(ctx),
            Page::Game => {
                self.render_side_panel(ctx);
                self.render_board(ctx);
            }
        }

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HISTORY_FILE;
    use crate::Pos;
    use std::fs;

    fn two_player_win(app: &mut GomokuApp) {
        app.settings = MatchSettings {
            mode: GameMode::Human,
            player1: "Alice".to_string(),
            player2: "Bob".to_string(),
            difficulty: Difficulty::Easy,
        };
        app.start_match();
        for c in 0..4 {
            app.state.try_place_stone(Pos::new(0, c)).unwrap();
            app.state.try_place_stone(Pos::new(1, c)).unwrap();
        }
        app.state.try_place_stone(Pos::new(0, 4)).unwrap();
        app.collect_finished();
    }

    #[test]
    fn test_finished_match_is_saved_and_reloaded() {
        let dir = std::env::temp_dir().join(format!("gomoku-app-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let history = HistoryFile::new(dir.join(HISTORY_FILE));

        let mut app = GomokuApp::with_config(GameConfig::default(), Some(history.clone()));
        assert!(app.scoreboard.is_empty());
        two_player_win(&mut app);
        assert_eq!(app.scoreboard.len(), 1);
        assert_eq!(app.stats_player, "Alice");
        assert!(app.state.message.is_none());

        let reopened = GomokuApp::with_config(GameConfig::default(), Some(history));
        assert_eq!(reopened.scoreboard.len(), 1);
        let record = reopened.scoreboard.get(0).unwrap();
        assert_eq!(record.winner, "Alice");
        assert_eq!(record.board_state[0], "XXXXX.....");
        assert_eq!(reopened.scoreboard.player_stats("Bob").losses, 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_in_memory_scoreboard() {
        let mut app = GomokuApp::default();
        two_player_win(&mut app);
        two_player_win(&mut app);
        assert_eq!(app.scoreboard.len(), 2);
        assert_eq!(app.scoreboard.player_stats("Alice").wins, 2);
    }
}
