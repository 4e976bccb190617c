//! Process settings
//!
//! Read from a JSON file at startup. Every field is optional; missing fields
//! take their defaults and an unreadable file means "all defaults".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::tuning::Tuning;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the best score is kept
    pub best_score_path: PathBuf,
    pub target_fps: u32,
    /// RNG seed; a fresh one is picked per process when unset
    pub seed: Option<u64>,
    /// Pace frames against the wall clock instead of simulating as fast as possible
    pub realtime: bool,
    /// Runs the headless demo plays before closing
    pub demo_runs: u32,
    /// Frames between HUD log lines
    pub hud_log_every: u64,

    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            best_score_path: PathBuf::from("best_score.txt"),
            target_fps: TARGET_FPS,
            seed: None,
            realtime: false,
            demo_runs: 3,
            hud_log_every: TARGET_FPS as u64,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Environment variable naming the config file
    pub const CONFIG_ENV: &'static str = "RUNNER_CONFIG";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.target_fps = settings.target_fps.max(1);
        settings.tuning = settings.tuning.validated();
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write the settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Seconds per simulated frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}
