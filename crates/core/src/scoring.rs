//! Scoring module - fixed line-clear table and per-drop points
//!
//! There is no level, combo or back-to-back logic: a landing is worth the table
//! entry for the number of rows it cleared, and every gravity step is worth
//! [`TICK_SCORE`].

use crate::types::{LINE_SCORES, TICK_SCORE};

/// Points for clearing `lines` rows with one landing
///
/// A single piece cannot clear more than four rows; larger counts (only reachable
/// on hand-built boards) are paid at the four-row rate.
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Points for `steps` gravity drops
pub fn drop_score(steps: u32) -> u32 {
    steps.saturating_mul(TICK_SCORE)
}

/// Recover a cleared-row count from a score delta
///
/// The delta includes the per-drop points collected on the way down, so each
/// bracket allows some slack above the table value. Deltas outside every
/// bracket count as zero lines.
pub fn lines_from_score_delta(delta: i64) -> u32 {
    match delta {
        101..=129 => 1,
        401..=449 => 2,
        801..=849 => 3,
        1601..=1649 => 4,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 400);
        assert_eq!(line_clear_score(3), 800);
        assert_eq!(line_clear_score(4), 1600);
        assert_eq!(line_clear_score(6), 1600);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(drop_score(0), 0);
        assert_eq!(drop_score(18), 18);
    }

    #[test]
    fn test_score_delta_brackets() {
        assert_eq!(lines_from_score_delta(19), 0);
        assert_eq!(lines_from_score_delta(100), 0);
        assert_eq!(lines_from_score_delta(118), 1);
        assert_eq!(lines_from_score_delta(415), 2);
        assert_eq!(lines_from_score_delta(812), 3);
        assert_eq!(lines_from_score_delta(1619), 4);
        assert_eq!(lines_from_score_delta(1700), 0);
    }
}
