//! Auto player - one-piece look-ahead over detached engine copies
//!
//! - [`features`]: heights, holes, transitions and the other board measures
//! - [`evaluator`]: weighted sum of those measures
//! - [`place`]: the steering policy shared by simulation and live play
//! - [`autoplay`]: search, decision cache and per-tick replay

pub mod autoplay;
pub mod evaluator;
pub mod features;
pub mod place;

pub use autoplay::{AutoPlayer, AutoPlayerConfig, Candidate, Decision, LineCount};
pub use evaluator::Weights;
pub use features::BoardFeatures;
pub use place::{play_out, seek_target, PieceControl, PlaceError, SeekStep};
