//! High-score store
//!
//! Persisted as JSON:
//!
//! ```json
//! {"daily": [{"score": 812, "date": "2026-10-19 14:02:11"}], "all_time": [...]}
//! ```
//!
//! Both buckets are sorted by score (highest first) and hold at most
//! [`MAX_ENTRIES`] entries. `daily` only keeps entries from the current
//! calendar day.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const MAX_ENTRIES: usize = 25;

/// Timestamp format of [`ScoreEntry::date`]
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub date: String,
}

impl ScoreEntry {
    pub fn new(score: u32, at: NaiveDateTime) -> Self {
        Self {
            score,
            date: at.format(DATE_FORMAT).to_string(),
        }
    }

    /// Calendar day of the entry, `None` if the date does not parse
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDateTime::parse_from_str(&self.date, DATE_FORMAT)
            .ok()
            .map(|at| at.date())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    pub daily: Vec<ScoreEntry>,
    #[serde(default)]
    pub all_time: Vec<ScoreEntry>,
}

impl HighScores {
    /// Load from `path`; a missing or unreadable file yields an empty store
    pub fn load(path: impl AsRef<Path>, now: NaiveDateTime) -> Self {
        let path = path.as_ref();
        let mut scores = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                log::warn!("ignoring malformed high scores in {}: {}", path.display(), err);
                HighScores::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => HighScores::default(),
            Err(err) => {
                log::warn!("cannot read high scores from {}: {}", path.display(), err);
                HighScores::default()
            }
        };
        scores.retain_day(now.date());
        scores
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("serialize high scores")?;
        fs::write(path, json)
            .with_context(|| format!("write high scores to {}", path.display()))?;
        Ok(())
    }

    /// Add a finished game's score
    ///
    /// Zero scores are ignored. Returns whether the score was recorded.
    pub fn record(&mut self, score: u32, now: NaiveDateTime) -> bool {
        if score == 0 {
            return false;
        }
        let entry = ScoreEntry::new(score, now);

        self.all_time.push(entry.clone());
        sort_and_cap(&mut self.all_time);

        self.retain_day(now.date());
        self.daily.push(entry);
        sort_and_cap(&mut self.daily);
        true
    }

    /// Drop daily entries that are not from `today`
    pub fn retain_day(&mut self, today: NaiveDate) {
        self.daily.retain(|e| e.day() == Some(today));
    }

    pub fn best(&self) -> Option<u32> {
        self.all_time.first().map(|e| e.score)
    }
}

fn sort_and_cap(entries: &mut Vec<ScoreEntry>) {
    // Stable: equal scores keep insertion order.
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_ENTRIES);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    /// Fresh path under the system temp dir, removed when dropped
    struct ScratchFile(std::path::PathBuf);

    impl ScratchFile {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir()
                .join(format!("autotris-{}-{}.json", name, std::process::id()));
            let _ = fs::remove_file(&path);
            Self(path)
        }
    }

    impl Drop for ScratchFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let file = ScratchFile::new("missing");
        let scores = HighScores::load(&file.0, at("2026-10-19 08:30:00"));
        assert_eq!(scores, HighScores::default());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let file = ScratchFile::new("malformed");
        fs::write(&file.0, "{not json").unwrap();
        let scores = HighScores::load(&file.0, at("2026-10-19 08:30:00"));
        assert_eq!(scores, HighScores::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let file = ScratchFile::new("round-trip");
        let now = at("2026-10-19 08:30:00");
        let mut scores = HighScores::default();
        scores.record(640, now);
        scores.record(210, now);

        scores.save(&file.0).unwrap();
        assert_eq!(HighScores::load(&file.0, now), scores);
    }

    #[test]
    fn test_load_drops_stale_daily_entries() {
        let file = ScratchFile::new("stale-daily");
        let mut scores = HighScores::default();
        scores.record(800, at("2026-10-18 21:00:00"));
        scores.record(150, at("2026-10-18 22:00:00"));
        scores.save(&file.0).unwrap();

        let loaded = HighScores::load(&file.0, at("2026-10-19 07:00:00"));
        assert!(loaded.daily.is_empty());
        assert_eq!(loaded.all_time, scores.all_time);
        assert_eq!(loaded.best(), Some(800));
    }

    #[test]
    fn test_save_to_missing_dir_fails_with_context() {
        let dir = ScratchFile::new("no-such-dir");
        let err = HighScores::default()
            .save(dir.0.join("scores.json"))
            .unwrap_err();
        assert!(err.to_string().starts_with("write high scores to"));
    }

    #[test]
    fn test_record_sorts_and_formats() {
        let mut scores = HighScores::default();
        let now = at("2026-10-19 08:30:00");
        assert!(scores.record(120, now));
        assert!(scores.record(900, now));
        assert!(scores.record(45, now));

        let all: Vec<u32> = scores.all_time.iter().map(|e| e.score).collect();
        assert_eq!(all, vec![900, 120, 45]);
        assert_eq!(scores.daily, scores.all_time);
        assert_eq!(scores.all_time[0].date, "2026-10-19 08:30:00");
        assert_eq!(scores.best(), Some(900));
    }

    #[test]
    fn test_zero_score_ignored() {
        let mut scores = HighScores::default();
        assert!(!scores.record(0, at("2026-10-19 08:30:00")));
        assert_eq!(scores, HighScores::default());
    }

    #[test]
    fn test_buckets_capped() {
        let mut scores = HighScores::default();
        let now = at("2026-10-19 08:30:00");
        for s in 1..=40 {
            scores.record(s, now);
        }
        assert_eq!(scores.all_time.len(), MAX_ENTRIES);
        assert_eq!(scores.daily.len(), MAX_ENTRIES);
        assert_eq!(scores.all_time[0].score, 40);
        assert_eq!(scores.all_time[MAX_ENTRIES - 1].score, 16);
    }

    #[test]
    fn test_daily_rolls_over() {
        let mut scores = HighScores::default();
        scores.record(500, at("2026-10-18 23:59:59"));
        scores.record(300, at("2026-10-19 00:00:01"));

        assert_eq!(scores.all_time.len(), 2);
        assert_eq!(scores.daily.len(), 1);
        assert_eq!(scores.daily[0].score, 300);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"daily":[],"all_time":[{"score":77,"date":"2024-01-02 03:04:05"}]}"#;
        let scores: HighScores = serde_json::from_str(json).unwrap();
        assert_eq!(scores.all_time[0].score, 77);
        assert_eq!(
            scores.all_time[0].day(),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );

        let partial: HighScores = serde_json::from_str(r#"{"all_time":[]}"#).unwrap();
        assert!(partial.daily.is_empty());
    }
}
