//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play a game of falling blocks without a screen: the
//! board, the seven shapes and their rotation, pieces, the engine state machine
//! and an isolated simulation view for look-ahead. No I/O happens here; hosts
//! drain [`EngineEvent`]s and forward them to whatever draws the game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision, landing and row clearing
//! - [`shape`]: piece bitmaps, bounding boxes and the rotation transform
//! - [`piece`]: a positioned shape that moves, rotates and drops
//! - [`engine`]: spawn / fall / land / clear / respawn and the score
//! - [`simulation`]: detached engine copies used by the auto player
//! - [`events`]: what the engine reports to observers
//! - [`rng`]: spawn selection sources
//! - [`scoring`]: line-clear table and drop points
//!
//! # Example
//!
//! ```
//! use autotris_core::{Engine, SimpleRng, TickMode};
//!
//! let mut engine = Engine::with_mode(SimpleRng::new(7), TickMode::EveryStep);
//! let before = engine.falling().unwrap().position();
//! engine.update(0);
//! assert_eq!(engine.falling().unwrap().position().1, before.1 + 1);
//! assert_eq!(engine.score(), 1);
//! ```

pub mod board;
pub mod engine;
pub mod events;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod simulation;

pub use autotris_types as types;

pub use board::{Board, ClearedRows, LineClear};
pub use engine::{Engine, Landing, TickMode, TickOutcome};
pub use events::{EngineEvent, EngineObserver, NullObserver};
pub use piece::Piece;
pub use rng::{FixedSequence, RandomSource, SimpleRng, DEFAULT_SEED};
pub use scoring::{drop_score, line_clear_score, lines_from_score_delta};
pub use shape::{BoundingBox, Shape};
pub use simulation::SimulationView;
