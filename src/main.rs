//! Gomoku GUI
//!
//! Play five-in-a-row against the computer or another player.
//!
//! An optional JSON file passed as the first argument overrides the default
//! game configuration. Finished matches are appended to
//! `~/.gomoku/history.jsonl`. Log verbosity follows `RUST_LOG`.

use std::fs;

use gomoku::record::HistoryFile;
use gomoku::ui::GomokuApp;
use gomoku::GameConfig;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn load_config() -> GameConfig {
    let Some(path) = std::env::args().nth(1) else {
        return GameConfig::default();
    };
    match fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| GameConfig::from_json_str(&json).map_err(|e| e.to_string()))
    {
        Ok(config) => {
            info!(%path, "loaded configuration");
            config
        }
        Err(e) => {
            error!(%path, error = %e, "ignoring configuration file");
            GameConfig::default()
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,gomoku=debug".into()),
        )
        .init();

    let config = load_config();
    info!(
        board_size = config.rules.board_size,
        time_limit_ms = config.time_limit_ms,
        "starting gomoku"
    );

    let history = match HistoryFile::default_location() {
        Ok(history) => {
            info!(path = %history.path().display(), "match history");
            Some(history)
        }
        Err(e) => {
            warn!(error = %e, "match history will not be saved");
            None
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, config, history)))),
    )
}
