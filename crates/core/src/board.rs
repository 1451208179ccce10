//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind (colour tag)
//! of the piece that landed there. Uses a flat array for cache locality and so that
//! a snapshot is a plain `Copy` of the cells.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::scoring::line_clear_score;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one landing, in detection order (top to bottom)
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Result of the row-clearing pass that follows a landing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    pub score: u32,
    pub cleared_rows: ClearedRows,
}

impl LineClear {
    pub fn lines(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from text rows, top row first
    ///
    /// Any character other than `.` or space marks a filled cell. Missing rows
    /// are padded at the top, so a pattern only needs to describe the bottom.
    ///
    /// ```
    /// use autotris_core::Board;
    ///
    /// let board = Board::from_rows(&["#########."]);
    /// assert!(board.is_occupied(0, 19));
    /// assert!(!board.is_occupied(9, 19));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let height = BOARD_HEIGHT as usize;
        let offset = height.saturating_sub(rows.len());
        for (i, row) in rows.iter().take(height).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch != '.' && ch != ' ' {
                    board.set(x as i8, y, Some(PieceKind::I));
                }
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Height of column `x`: rows from the first occupied cell down to the floor
    ///
    /// Columns outside the board have height 0.
    pub fn column_height(&self, x: usize) -> u32 {
        let width = BOARD_WIDTH as usize;
        if x >= width {
            return 0;
        }
        (0..BOARD_HEIGHT as usize)
            .find(|&y| self.cells[y * width + x].is_some())
            .map_or(0, |y| (BOARD_HEIGHT as usize - y) as u32)
    }

    /// Test whether `piece`, shifted by the offsets, would overlap a filled cell
    /// or leave the board
    ///
    /// Only cells inside the shape's bounding box are examined.
    pub fn collision(&self, piece: &Piece, x_offset: i8, y_offset: i8) -> bool {
        let (px, py) = piece.position();
        let bbox = piece.bounding_box();
        let left = px + bbox.x_min + x_offset;
        let right = px + bbox.x_max + x_offset;
        let top = py + bbox.y_min + y_offset;
        let bottom = py + bbox.y_max + y_offset;
        if left < 0 || right >= BOARD_WIDTH as i8 || top < 0 || bottom >= BOARD_HEIGHT as i8 {
            return true;
        }

        piece
            .shape()
            .cells()
            .any(|(dx, dy)| self.is_occupied(px + dx + x_offset, py + dy + y_offset))
    }

    /// Write the piece's cells into the grid permanently, then clear full rows
    pub fn land(&mut self, piece: &Piece) -> LineClear {
        let (px, py) = piece.position();
        let kind = piece.kind();
        for (dx, dy) in piece.shape().cells() {
            self.set(px + dx, py + dy, Some(kind));
        }
        self.clear_full_rows()
    }

    /// Remove one row and shift all rows above it down by one
    /// Uses copy_within so the overlapping move needs no scratch buffer
    pub fn drop_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;
        self.cells.copy_within(0..y * width, width);
        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Find every full row (top to bottom), then drop each one by its original index
    ///
    /// Dropping top to bottom keeps the remaining indices valid: a dropped row only
    /// moves rows above it, and every later full row lies below.
    pub fn clear_full_rows(&mut self) -> LineClear {
        let cleared_rows: ClearedRows = (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect();

        for &y in &cleared_rows {
            self.drop_row(y);
        }

        LineClear {
            score: line_clear_score(cleared_rows.len()),
            cleared_rows,
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Number of filled cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Render as `#`/`.` lines, one per row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE + BOARD_HEIGHT as usize);
        for row in self.rows() {
            for cell in row {
                out.push(if cell.is_some() { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
