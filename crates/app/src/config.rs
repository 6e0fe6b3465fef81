//! Config: optional JSON file next to the binary, every field defaulted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global chord that opens a new region, e.g. "Ctrl+D"
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
    /// Pixels moved per arrow key press
    #[serde(default = "default_movement_step")]
    pub movement_step: i32,
    /// Wait between hiding the overlay and grabbing the screen
    #[serde(default = "default_capture_delay_ms")]
    pub capture_delay_ms: u64,
    #[serde(default = "default_counters_file")]
    pub counters_file: PathBuf,
    /// File name suggested by the save dialog
    #[serde(default = "default_file_name")]
    pub default_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            movement_step: default_movement_step(),
            capture_delay_ms: default_capture_delay_ms(),
            counters_file: default_counters_file(),
            default_file_name: default_file_name(),
        }
    }
}

impl Config {
    pub fn capture_delay(&self) -> Duration {
        Duration::from_millis(self.capture_delay_ms)
    }

    fn sanitized(mut self) -> Self {
        if self.movement_step < 1 {
            log::warn!(
                "movement_step {} is not positive, using {}",
                self.movement_step,
                default_movement_step()
            );
            self.movement_step = default_movement_step();
        }
        self
    }
}

// ── Defaults ───────────────────────────────────────────────────────────────

fn default_hotkey() -> String { "Ctrl+D".into() }
fn default_movement_step() -> i32 { 1 }
fn default_capture_delay_ms() -> u64 { 150 }
fn default_counters_file() -> PathBuf { PathBuf::from(crate::counters::COUNTERS_FILE) }
fn default_file_name() -> String { "screenshot.png".into() }

// ── Load ───────────────────────────────────────────────────────────────────

fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("regionshot.json")))
        .unwrap_or_else(|| PathBuf::from("regionshot.json"))
}

/// Load config from regionshot.json next to the binary.
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

/// Missing or unreadable files fall back to defaults.
pub fn load_config_from(path: &Path) -> Config {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No config at {}, using defaults", path.display());
            return Config::default();
        }
        Err(e) => {
            log::warn!("Failed to read {}: {e}. Using defaults.", path.display());
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&text) {
        Ok(cfg) => {
            log::info!("Loaded config from {}", path.display());
            cfg.sanitized()
        }
        Err(e) => {
            log::warn!("Malformed config {}: {e}. Using defaults.", path.display());
            Config::default()
        }
    }
}
