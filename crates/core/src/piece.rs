//! Piece module - a placed, rotatable instance of a shape
//!
//! The anchor (x, y) is the top-left corner of the shape's N×N grid in board
//! coordinates, so the anchor itself may sit left of column 0 when the grid's
//! left columns are empty. Horizontal moves and rotations keep the bounding box
//! inside the board columns; rows are guarded only by collision checks.

use crate::board::{Board, LineClear};
use crate::shape::{BoundingBox, Shape};
use crate::types::{Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

/// A piece on (or queued for) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    x: i8,
    y: i8,
    /// Quarter turns from the spawn orientation, 0..=3
    angle: u8,
    falling: bool,
}

impl Piece {
    /// Create a piece with the canonical bitmap at an explicit anchor
    pub fn new(kind: PieceKind, x: i8, y: i8, falling: bool) -> Self {
        Self {
            kind,
            shape: Shape::of(kind),
            x,
            y,
            angle: 0,
            falling,
        }
    }

    /// Create a queued (not yet falling) piece at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, SPAWN_X, SPAWN_Y, false)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn angle(&self) -> u8 {
        self.angle
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.shape.bounding_box()
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    /// Mark the piece as the live falling piece
    pub fn fall(&mut self) {
        self.falling = true;
    }

    /// Shift one column in `direction`
    ///
    /// Returns false, leaving the piece untouched, if the bounding box would
    /// leave the board columns or the shifted cells collide.
    pub fn try_move(&mut self, board: &Board, direction: Direction) -> bool {
        let new_x = self.x + direction.delta();
        let bbox = self.bounding_box();
        if new_x + bbox.x_min < 0 || new_x + bbox.x_max >= BOARD_WIDTH as i8 {
            return false;
        }
        if board.collision(self, direction.delta(), 0) {
            return false;
        }
        self.x = new_x;
        true
    }

    /// Rotate a quarter turn in `direction`
    ///
    /// After rotating, the anchor is nudged one column at a time until the new
    /// bounding box fits the board columns. If the result collides, shape,
    /// angle and position are all restored. Returns whether the rotation stuck.
    pub fn rotate(&mut self, board: &Board, direction: Direction) -> bool {
        let saved = *self;

        self.shape = self.shape.rotated(direction);
        self.angle = (self.angle as i8 + direction.delta()).rem_euclid(4) as u8;

        let bbox = self.bounding_box();
        while self.x + bbox.x_min < 0 {
            self.x += 1;
        }
        while self.x + bbox.x_max >= BOARD_WIDTH as i8 {
            self.x -= 1;
        }

        if board.collision(self, 0, 0) {
            *self = saved;
            return false;
        }
        true
    }

    /// Advance one row, or land if the piece is resting on the floor or a block
    ///
    /// Returns `Some` with the row-clear result when the piece landed; the board
    /// now holds its cells. Returns `None` after a plain one-row fall.
    pub fn drop(&mut self, board: &mut Board) -> Option<LineClear> {
        let bottom = self.y + self.bounding_box().y_max;
        if bottom == BOARD_HEIGHT as i8 - 1 || board.collision(self, 0, 1) {
            return Some(board.land(self));
        }
        self.y += 1;
        None
    }
}
