//! Watcher configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default polling cadence, matching the game's log flush rhythm.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// What to do with log content that predates `start()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartMode {
    /// Begin at the current end of file; publish live events only.
    #[default]
    SkipHistory,
    /// Begin at offset zero; re-publish everything already in the log.
    ReplayHistory,
}

/// Configuration for a [`crate::watcher::LogWatcher`].
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Path to `Player.log`.
    pub log_path: PathBuf,
    /// Polling cadence.
    pub poll_interval: Duration,
    /// History policy at start.
    pub start_mode: StartMode,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            start_mode: StartMode::default(),
        }
    }
}

/// Default `Player.log` location for the current platform.
///
/// Falls back to the relative filename when the home directory cannot be
/// determined; `start()` will then fail with `FileNotFound`, which is the
/// right signal for a machine without the game installed.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from("Player.log");
    };

    if cfg!(target_os = "macos") {
        home.join("Library")
            .join("Logs")
            .join("Wizards Of The Coast")
            .join("MTGA")
            .join("Player.log")
    } else {
        home.join("AppData")
            .join("LocalLow")
            .join("Wizards Of The Coast")
            .join("MTGA")
            .join("Player.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatcherConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.start_mode, StartMode::SkipHistory);
        assert!(config.log_path.ends_with("Player.log"));
    }

    #[test]
    fn test_default_log_path_under_home() {
        if let Some(home) = dirs::home_dir() {
            assert!(default_log_path().starts_with(home));
        }
    }

    #[test]
    fn test_start_mode_serde_round_trip() {
        let json = serde_json::to_string(&StartMode::ReplayHistory).unwrap();
        assert_eq!(json, "\"replay-history\"");
        let mode: StartMode = serde_json::from_str(&json).unwrap();
        assert_eq!(mode, StartMode::ReplayHistory);
    }
}
