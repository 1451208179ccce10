//! Engine events and the render/score sink they are delivered to
//!
//! A live engine records what happened during a call instead of calling out
//! directly; the host drains the queue and forwards it to its observer. A
//! simulation instance never records anything.

use crate::board::Board;
use crate::piece::Piece;

/// Something an observer may want to redraw or persist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A piece became visible (falling or shown as "next")
    BlockRegistered(Piece),
    /// A piece is gone (landed or discarded on restart)
    BlockUnregistered(Piece),
    /// Board cells changed (landing with cleared rows, new piece, restart)
    BoardChanged,
    /// Running score
    ScoreChanged(u32),
    /// A piece landed with its anchor on row 0
    GameOver,
}

/// Render/score sink
///
/// Implementations receive read-only views and must not hold on to them.
pub trait EngineObserver {
    fn register_block(&mut self, _piece: &Piece) {}
    fn unregister_block(&mut self, _piece: &Piece) {}
    fn update_blockfield(&mut self, _board: &Board) {}
    fn update_score(&mut self, _score: u32) {}
    fn game_over(&mut self) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl EngineObserver for NullObserver {}

/// Deliver one event; `board` is the engine's current board
pub fn deliver(event: &EngineEvent, board: &Board, observer: &mut impl EngineObserver) {
    match event {
        EngineEvent::BlockRegistered(piece) => observer.register_block(piece),
        EngineEvent::BlockUnregistered(piece) => observer.unregister_block(piece),
        EngineEvent::BoardChanged => observer.update_blockfield(board),
        EngineEvent::ScoreChanged(score) => observer.update_score(*score),
        EngineEvent::GameOver => observer.game_over(),
    }
}
