//! Linear fitness over [`BoardFeatures`]

use crate::features::BoardFeatures;

/// Feature weights; positive rewards, negative penalises
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub smoothness: f64,
    pub total_height: f64,
    pub completed_lines: f64,
    pub range: f64,
    pub max_height: f64,
    pub min_height: f64,
    /// Empty cells under a filled cell; weighted alongside `overhangs`
    /// rather than in their place
    pub covered_holes: f64,
    pub overhangs: f64,
    pub row_transitions: f64,
    pub column_transitions: f64,
    pub block_height: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            smoothness: -2.5,
            total_height: -3.0,
            completed_lines: 100.0,
            range: -5.5,
            max_height: 0.0,
            min_height: 0.0,
            covered_holes: -8.5,
            overhangs: -7.0,
            row_transitions: -5.5,
            column_transitions: -6.5,
            block_height: 0.0,
        }
    }
}

impl Weights {
    pub fn fitness(&self, f: &BoardFeatures) -> f64 {
        f.smoothness as f64 * self.smoothness
            + f.total_height as f64 * self.total_height
            + f.completed_lines as f64 * self.completed_lines
            + f.range as f64 * self.range
            + f.max_height as f64 * self.max_height
            + f.min_height as f64 * self.min_height
            + f.covered_holes as f64 * self.covered_holes
            + f.overhangs as f64 * self.overhangs
            + f.row_transitions as f64 * self.row_transitions
            + f.column_transitions as f64 * self.column_transitions
            + f.block_height * self.block_height
    }
}
