//! Runner configuration from environment variables

use std::env;
use std::path::PathBuf;

use crate::core::DEFAULT_SEED;

/// Headless runner settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub seed: u32,
    pub games: u32,
    /// Pieces per game before the runner gives up on it
    pub max_pieces: u32,
    pub scores_path: Option<PathBuf>,
    /// Read key commands from stdin instead of letting the auto player drive
    pub manual: bool,
    pub log_level: log::LevelFilter,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            games: 1,
            max_pieces: 500,
            scores_path: None,
            manual: false,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl RunnerConfig {
    /// Create from environment variables; unparseable values fall back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RunnerConfig::from_env`] with an explicit variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("AUTOTRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let games = lookup("AUTOTRIS_GAMES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.games);

        let max_pieces = lookup("AUTOTRIS_MAX_PIECES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pieces);

        let scores_path = lookup("AUTOTRIS_SCORES_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let manual = lookup("AUTOTRIS_MANUAL")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.manual);

        let log_level = lookup("AUTOTRIS_LOG")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            seed,
            games,
            max_pieces,
            scores_path,
            manual,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> RunnerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunnerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), RunnerConfig::default());
        assert_eq!(RunnerConfig::default().seed, 42);
    }

    #[test]
    fn test_parses_values() {
        let c = config(&[
            ("AUTOTRIS_SEED", "7"),
            ("AUTOTRIS_GAMES", "3"),
            ("AUTOTRIS_MAX_PIECES", " 50 "),
            ("AUTOTRIS_SCORES_PATH", "/tmp/high_scores.json"),
            ("AUTOTRIS_MANUAL", "TRUE"),
            ("AUTOTRIS_LOG", "debug"),
        ]);
        assert_eq!(c.seed, 7);
        assert_eq!(c.games, 3);
        assert_eq!(c.max_pieces, 50);
        assert_eq!(c.scores_path, Some(PathBuf::from("/tmp/high_scores.json")));
        assert!(c.manual);
        assert_eq!(c.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let c = config(&[
            ("AUTOTRIS_SEED", "forty-two"),
            ("AUTOTRIS_GAMES", "-1"),
            ("AUTOTRIS_SCORES_PATH", "   "),
            ("AUTOTRIS_MANUAL", "yes"),
            ("AUTOTRIS_LOG", "loud"),
        ]);
        assert_eq!(c, RunnerConfig::default());
    }
}
