//! Look-ahead view over a detached engine copy
//!
//! A [`SimulationView`] owns a deep copy of an engine: its own board, pieces and
//! random source. It drops on every step, never consults a clock and never
//! records events, so a search can play candidate placements to completion
//! without any effect on the live game.

use crate::board::Board;
use crate::engine::{Engine, TickOutcome};
use crate::rng::RandomSource;
use crate::types::{Direction, PieceKind};

#[derive(Debug, Clone)]
pub struct SimulationView<R> {
    engine: Engine<R>,
}

impl<R: RandomSource + Clone> SimulationView<R> {
    /// Copy `engine` into an isolated simulation
    pub fn of(engine: &Engine<R>) -> Self {
        Self {
            engine: engine.detached(),
        }
    }

    /// Anchor of the falling piece, (0, 0) when there is none
    pub fn falling_position(&self) -> (i8, i8) {
        self.engine.falling().map_or((0, 0), |p| p.position())
    }

    pub fn falling_angle(&self) -> u8 {
        self.engine.falling().map_or(0, |p| p.angle())
    }

    pub fn falling_kind(&self) -> Option<PieceKind> {
        self.engine.falling().map(|p| p.kind())
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.engine.next().map(|p| p.kind())
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn lines(&self) -> u32 {
        self.engine.lines()
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    pub fn try_move(&mut self, direction: Direction) -> bool {
        self.engine.try_move(direction)
    }

    pub fn rotate(&mut self, direction: Direction) -> bool {
        self.engine.rotate(direction)
    }

    /// One tick; gravity always applies
    pub fn step(&mut self) -> TickOutcome {
        self.engine.update(0)
    }

    /// Step until the current piece lands (or the game is already over)
    pub fn run_to_landing(&mut self) -> TickOutcome {
        loop {
            let outcome = self.step();
            if outcome.landed() || !outcome.dropped {
                return outcome;
            }
        }
    }
}

impl<R: RandomSource + Clone> Engine<R> {
    /// Isolated look-ahead copy of this engine
    pub fn simulate(&self) -> SimulationView<R> {
        SimulationView::of(self)
    }
}
