//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the simulation core, the autoplayer and any host loop alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0), the top-left corner of the piece's N×N grid
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_INTERVAL_MS` | 500 | Gravity interval during manual play |
//! | `AUTOPLAY_MOVE_INTERVAL_MS` | 10 | Gravity interval while autoplay is on |
//! | `TICK_SCORE` | 1 | Points awarded for every gravity drop |
//! | `LINE_SCORES` | 0/100/400/800/1600 | Points for clearing 0-4 rows at once |
//!
//! # Examples
//!
//! ```
//! use autotris_types::{Command, Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Direction::Left.delta(), -1);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the spawn anchor (top-left of the shape grid)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of the spawn anchor
pub const SPAWN_Y: i8 = 0;

/// Gravity interval in milliseconds when a human is playing
pub const MOVE_INTERVAL_MS: u32 = 500;

/// Gravity interval in milliseconds while autoplay drives the game
pub const AUTOPLAY_MOVE_INTERVAL_MS: u32 = 10;

/// Points awarded for each gravity step of the falling piece
pub const TICK_SCORE: u32 = 1;

/// Line clear scoring table
///
/// Points for clearing N rows with a single landing:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 400 points
/// - 3 lines: 800 points
/// - 4 lines: 1600 points
///
/// There is no level multiplier and no bonus beyond four rows.
pub const LINE_SCORES: [u32; 5] = [0, 100, 400, 800, 1600];

/// The seven piece kinds
///
/// The declaration order is the random-source contract: a source yields an
/// index in `0..=6` which maps onto I, J, L, O, S, T, Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in random-source order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Map a random-source index onto a kind
    ///
    /// ```
    /// use autotris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(3), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Colour tag written into the board when a piece of this kind lands
    pub fn colour(&self) -> &'static str {
        match self {
            PieceKind::I => "cyan",
            PieceKind::J => "blue",
            PieceKind::L => "orange",
            PieceKind::O => "yellow",
            PieceKind::S => "green",
            PieceKind::T => "purple",
            PieceKind::Z => "red",
        }
    }
}

/// Horizontal direction used by both moves and rotations
///
/// For rotations `Right` is clockwise and `Left` counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Signed column step (-1 or +1)
    pub fn delta(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Discrete input commands a host can issue
///
/// Each command maps onto exactly one engine or session call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the falling piece one column left
    MoveLeft,
    /// Move the falling piece one column right
    MoveRight,
    /// Rotate counter-clockwise
    RotateLeft,
    /// Rotate clockwise
    RotateRight,
    /// Drop the falling piece until it lands
    HardDrop,
    /// Switch the autoplayer on or off
    ToggleAutoplay,
    /// Start a fresh game
    Restart,
}

impl Command {
    /// Parse a command name (case-insensitive)
    ///
    /// ```
    /// use autotris_types::Command;
    ///
    /// assert_eq!(Command::from_str("rotateRight"), Some(Command::RotateRight));
    /// assert_eq!(Command::from_str("TOGGLEAUTOPLAY"), Some(Command::ToggleAutoplay));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotateleft" => Some(Command::RotateLeft),
            "rotateright" => Some(Command::RotateRight),
            "harddrop" => Some(Command::HardDrop),
            "toggleautoplay" => Some(Command::ToggleAutoplay),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateLeft => "rotateLeft",
            Command::RotateRight => "rotateRight",
            Command::HardDrop => "hardDrop",
            Command::ToggleAutoplay => "toggleAutoplay",
            Command::Restart => "restart",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Landed cell, the kind doubles as its colour tag
pub type Cell = Option<PieceKind>;
