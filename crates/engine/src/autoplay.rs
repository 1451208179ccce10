//! One-piece look-ahead auto player
//!
//! When a new piece appears at the top, every (angle, column) pair is played
//! out on a detached copy of the engine and the resulting board is scored with
//! [`Weights`]. The winner is cached and steered one move and one rotation per
//! tick until the next piece appears.

use std::ops::Range;

use autotris_core::{lines_from_score_delta, Engine, RandomSource};

use crate::evaluator::Weights;
use crate::features::BoardFeatures;
use crate::place::{play_out, seek_target, SeekStep};

/// Angles tried for every piece
pub const ANGLES: Range<u8> = 0..4;

/// Target anchor columns tried for every angle
///
/// Wider than the board on both sides; out-of-range targets stop at the wall.
pub const COLUMNS: Range<i8> = -3..13;

/// Where the completed-lines feature comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCount {
    /// Engine's running cleared-row counter
    #[default]
    Direct,
    /// Bracketed score difference (drop points ride along inside the slack)
    ScoreDelta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutoPlayerConfig {
    pub weights: Weights,
    pub line_count: LineCount,
    pub columns: Range<i8>,
}

impl Default for AutoPlayerConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            line_count: LineCount::Direct,
            columns: COLUMNS,
        }
    }
}

/// Chosen target for the current piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub column: i8,
    pub angle: u8,
    pub fitness: f64,
}

impl Default for Decision {
    fn default() -> Self {
        Self {
            column: 0,
            angle: 0,
            fitness: f64::NEG_INFINITY,
        }
    }
}

/// One scored candidate of a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub decision: Decision,
    pub features: BoardFeatures,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    config: AutoPlayerConfig,
    decision: Decision,
    /// Falling-piece row seen on the previous call; `None` before the first
    prev_row: Option<i8>,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(AutoPlayerConfig::default())
    }
}

impl AutoPlayer {
    pub fn new(config: AutoPlayerConfig) -> Self {
        Self {
            config,
            decision: Decision::default(),
            prev_row: None,
        }
    }

    pub fn config(&self) -> &AutoPlayerConfig {
        &self.config
    }

    /// Cached target for the current piece
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Forget the previous observation so the next call searches
    pub fn reset(&mut self) {
        self.prev_row = None;
        self.decision = Decision::default();
    }

    /// Steer the live engine one step
    ///
    /// Searches when the falling piece is higher than on the previous call (a
    /// new piece spawned), otherwise replays the cached decision.
    pub fn next_move<R: RandomSource + Clone>(&mut self, engine: &mut Engine<R>) -> SeekStep {
        let Some((_, y)) = engine.falling().map(|p| p.position()) else {
            return SeekStep::default();
        };
        if self.prev_row.map_or(true, |prev| y < prev) {
            self.decision = self.best_move(engine);
            log::debug!(
                "piece {:?}: target column {} angle {} (fitness {:.1})",
                engine.falling().map(|p| p.kind()),
                self.decision.column,
                self.decision.angle,
                self.decision.fitness
            );
        }
        self.prev_row = Some(y);
        seek_target(engine, self.decision.column, self.decision.angle)
    }

    /// Best candidate for the current falling piece
    ///
    /// Only a strictly greater fitness replaces the running best, so ties keep
    /// the first candidate in angle-major, ascending-column order.
    pub fn best_move<R: RandomSource + Clone>(&self, engine: &Engine<R>) -> Decision {
        let mut best = Decision::default();
        for candidate in self.evaluate_candidates(engine) {
            if candidate.decision.fitness > best.fitness {
                best = candidate.decision;
            }
        }
        best
    }

    /// Play out and score every (angle, column) pair
    pub fn evaluate_candidates<R: RandomSource + Clone>(&self, engine: &Engine<R>) -> Vec<Candidate> {
        let columns = self.config.columns.clone();
        let mut candidates = Vec::with_capacity(ANGLES.len() * columns.len());

        for angle in ANGLES {
            for column in columns.clone() {
                let mut view = engine.simulate();
                let before_board = *view.board();
                let before_score = view.score();
                let before_lines = view.lines();

                let landing = match play_out(&mut view, column, angle) {
                    Ok(landing) => landing,
                    Err(err) => {
                        log::debug!("skipping column {} angle {}: {}", column, angle, err);
                        continue;
                    }
                };

                let completed_lines = match self.config.line_count {
                    LineCount::Direct if landing.game_over => landing.lines() as u32,
                    LineCount::Direct => view.lines() - before_lines,
                    LineCount::ScoreDelta => {
                        lines_from_score_delta(view.score() as i64 - before_score as i64)
                    }
                };
                let features = BoardFeatures::measure(&before_board, view.board(), completed_lines);
                let fitness = self.config.weights.fitness(&features);

                candidates.push(Candidate {
                    decision: Decision {
                        column,
                        angle,
                        fitness,
                    },
                    features,
                    game_over: landing.game_over,
                });
            }
        }
        candidates
    }
}
