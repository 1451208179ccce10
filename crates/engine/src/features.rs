//! Board features measured after a simulated landing
//!
//! All scans are O(W*H) over the fixed 10x20 grid and allocate nothing.

use autotris_core::types::{BOARD_HEIGHT, BOARD_WIDTH};
use autotris_core::Board;

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoardFeatures {
    /// Per column: `H - first occupied row`, or 0 for an empty column
    pub heights: [u32; W],
    pub total_height: u32,
    /// Sum of |h[c] - h[c+1]|
    pub smoothness: u32,
    pub max_height: u32,
    pub min_height: u32,
    /// `max_height - min_height`
    pub range: u32,
    /// Empty cells counted down each column while in a "gap" state
    pub covered_holes: u32,
    /// Empty cells directly below an occupied cell
    pub overhangs: u32,
    /// Occupied/empty transitions scanned along rows
    pub row_transitions: u32,
    /// Occupied/empty transitions scanned down columns
    pub column_transitions: u32,
    /// Midpoint row of the cells that changed while landing
    pub block_height: f64,
    pub completed_lines: u32,
}

impl BoardFeatures {
    /// Measure `after`, using `before` to locate the cells the landing changed
    pub fn measure(before: &Board, after: &Board, completed_lines: u32) -> Self {
        let heights = column_heights(after);

        let mut total_height = 0;
        let mut max_height = 0;
        let mut min_height = u32::MAX;
        for &h in &heights {
            total_height += h;
            max_height = max_height.max(h);
            min_height = min_height.min(h);
        }
        let (row_transitions, column_transitions) = transitions(after);

        Self {
            heights,
            total_height,
            smoothness: smoothness(&heights),
            max_height,
            min_height,
            range: max_height - min_height,
            covered_holes: covered_holes(after),
            overhangs: overhangs(after),
            row_transitions,
            column_transitions,
            block_height: block_height(before, after),
            completed_lines,
        }
    }
}

pub fn column_heights(board: &Board) -> [u32; W] {
    let mut heights = [0u32; W];
    for (c, h) in heights.iter_mut().enumerate() {
        *h = board.column_height(c);
    }
    heights
}

pub fn smoothness(heights: &[u32; W]) -> u32 {
    heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum()
}

fn occupied(board: &Board, x: usize, y: usize) -> bool {
    board.is_occupied(x as i8, y as i8)
}

/// Count (i): walk each column top-down; an occupied cell with an empty cell
/// below opens a gap, an empty cell with an occupied cell below closes it, and
/// every row visited while the gap is open counts.
pub fn covered_holes(board: &Board) -> u32 {
    let mut holes = 0;
    for x in 0..W {
        let mut gap = false;
        for y in 0..H {
            if gap {
                holes += 1;
            }
            if y + 1 < H {
                let here = occupied(board, x, y);
                let below = occupied(board, x, y + 1);
                if here && !below {
                    gap = true;
                }
                if !here && below {
                    gap = false;
                }
            }
        }
    }
    holes
}

/// Count (ii): empty cells directly below an occupied cell
pub fn overhangs(board: &Board) -> u32 {
    let mut holes = 0;
    for y in 0..H - 1 {
        for x in 0..W {
            if occupied(board, x, y) && !occupied(board, x, y + 1) {
                holes += 1;
            }
        }
    }
    holes
}

/// (row, column) occupancy transitions
pub fn transitions(board: &Board) -> (u32, u32) {
    let mut rows = 0;
    let mut columns = 0;
    for x in 0..W {
        for y in 0..H - 1 {
            if occupied(board, x, y) != occupied(board, x, y + 1) {
                columns += 1;
            }
        }
    }
    for y in 0..H {
        for x in 0..W - 1 {
            if occupied(board, x, y) != occupied(board, x + 1, y) {
                rows += 1;
            }
        }
    }
    (rows, columns)
}

/// Midpoint of the highest and lowest changed rows, 0 when nothing changed
pub fn block_height(before: &Board, after: &Board) -> f64 {
    let mut span: Option<(usize, usize)> = None;
    for y in 0..H {
        for x in 0..W {
            let i = y * W + x;
            if before.cells()[i] != after.cells()[i] {
                span = Some(match span {
                    None => (y, y),
                    Some((lo, hi)) => (lo.min(y), hi.max(y)),
                });
            }
        }
    }
    span.map_or(0.0, |(lo, hi)| (lo + hi) as f64 / 2.0)
}
