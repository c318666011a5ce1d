//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use tally_core::{SettingsDraft, TrackedInput, ValidationError};

/// Application configuration.
///
/// Field names follow the legacy settings file so old files load unchanged.
/// Defaults are applied by serde, not a figment provider: a provider would
/// put `amount` next to a file's `group_n` and fail as a duplicate field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `keyboard` or `mouse`.
    pub input_type: String,
    /// Scan code for keyboard; 1-5 buttons, 10/11 wheel up/down for mouse.
    pub input_code: u32,
    /// Count every press when true; otherwise `amount`/`idle_ms` apply.
    #[serde(alias = "is_rapid_mode")]
    pub rapid_mode: bool,
    /// Presses (idle off) or bursts (idle on) per count.
    #[serde(alias = "group_n")]
    pub amount: i64,
    /// Idle gap that closes a sequence; 0 disables it.
    #[serde(alias = "burst_idle_ms")]
    pub idle_ms: i64,
    /// Starting count.
    pub count: i64,
    /// Start paused.
    #[serde(alias = "is_paused")]
    pub paused: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_type: "keyboard".to_string(),
            input_code: 44,
            rapid_mode: true,
            amount: 1,
            idle_ms: 0,
            count: 0,
            paused: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TALLY_*)
        figment = figment.merge(Env::prefixed("TALLY_"));

        figment.extract()
    }

    /// Resolves the tracked input named by `input_type`/`input_code`.
    pub fn tracked(&self) -> Result<TrackedInput, ValidationError> {
        TrackedInput::from_legacy(&self.input_type, self.input_code)
    }

    /// Builds the settings draft handed to the pump. Clamping happens when
    /// the pump ingests it.
    pub fn draft(&self) -> Result<SettingsDraft, ValidationError> {
        Ok(SettingsDraft {
            tracked: self.tracked()?,
            rapid_mode: self.rapid_mode,
            amount: self.amount,
            idle_ms: self.idle_ms,
            paused: self.paused,
            count: self.count,
        })
    }
}

/// Returns the platform-specific config directory for tally.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tally"))
}
