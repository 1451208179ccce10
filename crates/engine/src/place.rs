use std::fmt;

use autotris_core::{Engine, Landing, RandomSource, SimulationView};
use autotris_core::types::Direction;

/// Placement request that cannot be played out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    NoActive,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::NotPlayable => write!(f, "game is over"),
            PlaceError::NoActive => write!(f, "no falling piece"),
        }
    }
}

impl std::error::Error for PlaceError {}

/// What a steering step can read and do to the falling piece
pub trait PieceControl {
    fn falling_position(&self) -> Option<(i8, i8)>;
    fn falling_angle(&self) -> u8;
    fn try_move(&mut self, direction: Direction) -> bool;
    fn rotate(&mut self, direction: Direction) -> bool;
}

impl<R: RandomSource + Clone> PieceControl for Engine<R> {
    fn falling_position(&self) -> Option<(i8, i8)> {
        self.falling().map(|p| p.position())
    }

    fn falling_angle(&self) -> u8 {
        self.falling().map_or(0, |p| p.angle())
    }

    fn try_move(&mut self, direction: Direction) -> bool {
        Engine::try_move(self, direction)
    }

    fn rotate(&mut self, direction: Direction) -> bool {
        Engine::rotate(self, direction)
    }
}

impl<R: RandomSource + Clone> PieceControl for SimulationView<R> {
    fn falling_position(&self) -> Option<(i8, i8)> {
        self.falling_kind().map(|_| SimulationView::falling_position(self))
    }

    fn falling_angle(&self) -> u8 {
        SimulationView::falling_angle(self)
    }

    fn try_move(&mut self, direction: Direction) -> bool {
        SimulationView::try_move(self, direction)
    }

    fn rotate(&mut self, direction: Direction) -> bool {
        SimulationView::rotate(self, direction)
    }
}

/// Result of one steering step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeekStep {
    pub moved: bool,
    pub rotated: bool,
}

/// One step toward (`column`, `angle`): at most one move and one rotation
///
/// Moves right when the target column is right of the anchor and left when it
/// is left of it. Rotates left only for the 0 -> 3 case; otherwise rotates
/// right while the target angle is above the current one. Targets outside the
/// board simply stop at the wall.
pub fn seek_target(control: &mut impl PieceControl, column: i8, angle: u8) -> SeekStep {
    let Some((x, _)) = control.falling_position() else {
        return SeekStep::default();
    };
    let current = control.falling_angle();

    let mut step = SeekStep::default();
    if column > x {
        step.moved = control.try_move(Direction::Right);
    }
    if column < x {
        step.moved = control.try_move(Direction::Left);
    }
    if angle == 3 && current == 0 {
        step.rotated = control.rotate(Direction::Left);
    } else if angle > current {
        step.rotated = control.rotate(Direction::Right);
    }
    step
}

/// Play the falling piece of `view` to its landing while steering toward the
/// target
///
/// Gravity applies before the first steering step, as on the live board.
pub fn play_out<R: RandomSource + Clone>(
    view: &mut SimulationView<R>,
    column: i8,
    angle: u8,
) -> Result<Landing, PlaceError> {
    if view.is_game_over() {
        return Err(PlaceError::NotPlayable);
    }
    if view.falling_kind().is_none() {
        return Err(PlaceError::NoActive);
    }
    loop {
        let outcome = view.step();
        if let Some(landing) = outcome.landing {
            return Ok(landing);
        }
        if !outcome.dropped {
            return Err(PlaceError::NoActive);
        }
        seek_target(&mut *view, column, angle);
    }
}
