//! Autotris (workspace facade crate).
//!
//! Re-exports the member crates under short names and adds the pieces a host
//! needs around them: the [`session::Session`] loop body, the high-score store,
//! runner configuration and the key map.

pub use autotris_core as core;
pub use autotris_engine as engine;
pub use autotris_types as types;

pub mod config;
pub mod input;
pub mod scores;
pub mod session;
