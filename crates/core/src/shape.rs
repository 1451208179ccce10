//! Shape module - the seven piece bitmaps and their rotation transform
//!
//! Each shape is an N×N grid (N is 3 or 4) of occupied/empty cells. Rotation is
//! a plain matrix transform of the grid: clockwise maps cell (x, y) to
//! (N-1-y, x), counter-clockwise is its inverse. The bounding box of the
//! occupied cells is recomputed after every rotation; collision and landing
//! only ever look inside it.

use crate::types::{Direction, PieceKind};

/// Largest grid side used by any shape
pub const MAX_SHAPE_SIZE: usize = 4;

/// Inclusive span of the occupied cells of a shape, in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x_min: i8,
    pub y_min: i8,
    pub x_max: i8,
    pub y_max: i8,
}

/// An N×N cell grid plus its cached bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    size: u8,
    bbox: BoundingBox,
}

impl Shape {
    /// Build a shape from its grid rows (3 or 4 rows of equal length)
    fn from_rows<const N: usize>(bits: [[u8; N]; N]) -> Self {
        let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in bits.iter().enumerate() {
            for (x, &bit) in row.iter().enumerate() {
                rows[y][x] = bit != 0;
            }
        }
        Self::with_rows(rows, N as u8)
    }

    fn with_rows(rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE], size: u8) -> Self {
        Self {
            rows,
            size,
            bbox: bounding_box(&rows, size),
        }
    }

    /// Canonical starting bitmap for a piece kind
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::J => Self::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::L => Self::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
            PieceKind::O => Self::from_rows([[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
            PieceKind::S => Self::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
            PieceKind::T => Self::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::Z => Self::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        }
    }

    /// Side length of the grid
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Whether grid cell (x, y) is occupied; out-of-grid cells are empty
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        if x < 0 || y < 0 || x >= self.size as i8 || y >= self.size as i8 {
            return false;
        }
        self.rows[y as usize][x as usize]
    }

    /// Occupied cells as (x, y) grid offsets, restricted to the bounding box
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let b = self.bbox;
        (b.y_min..=b.y_max)
            .flat_map(move |y| (b.x_min..=b.x_max).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.is_filled(x, y))
    }

    /// Return the shape rotated a quarter turn in the given direction
    pub fn rotated(&self, direction: Direction) -> Self {
        let n = self.size as usize;
        let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                match direction {
                    Direction::Right => rows[x][n - 1 - y] = self.rows[y][x],
                    Direction::Left => rows[n - 1 - x][y] = self.rows[y][x],
                }
            }
        }
        Self::with_rows(rows, self.size)
    }

    /// Render as `#`/`.` lines, one per grid row
    pub fn to_text(&self) -> String {
        let n = self.size as usize;
        let mut out = String::with_capacity(n * (n + 1));
        for row in &self.rows[..n] {
            for &filled in &row[..n] {
                out.push(if filled { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

fn bounding_box(rows: &[[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE], size: u8) -> BoundingBox {
    let n = size as i8;
    let mut bbox = BoundingBox {
        x_min: n,
        y_min: n,
        x_max: 0,
        y_max: 0,
    };
    for y in 0..n {
        for x in 0..n {
            if rows[y as usize][x as usize] {
                bbox.x_min = bbox.x_min.min(x);
                bbox.y_min = bbox.y_min.min(y);
                bbox.x_max = bbox.x_max.max(x);
                bbox.y_max = bbox.y_max.max(y);
            }
        }
    }
    bbox
}
