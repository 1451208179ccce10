//! Board tests - grid access, collision, landing and row clearing

use autotris::core::{Board, Piece};
use autotris::types::{Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.set(10, 0, Some(PieceKind::T)));
}

#[test]
fn test_collision_with_every_wall() {
    let board = Board::new();
    let piece = Piece::spawn(PieceKind::T);

    assert!(!board.collision(&piece, 0, 0));
    // T covers grid columns 0-2 and rows 0-1 at spawn (3, 0).
    assert!(board.collision(&piece, -4, 0));
    assert!(board.collision(&piece, 5, 0));
    assert!(board.collision(&piece, 0, -1));
    assert!(board.collision(&piece, 0, 19));
    assert!(!board.collision(&piece, -3, 18));
    assert!(!board.collision(&piece, 4, 18));
}

#[test]
fn test_collision_with_cells() {
    let mut board = Board::new();
    let piece = Piece::spawn(PieceKind::O);
    board.set(4, 5, Some(PieceKind::Z));

    // O cells sit at rows 1-2 of its grid.
    assert!(!board.collision(&piece, 0, 2));
    assert!(board.collision(&piece, 0, 3));
    assert!(board.collision(&piece, 0, 4));
    assert!(!board.collision(&piece, 0, 5));
}

#[test]
fn test_no_collision_anywhere_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let mut piece = Piece::spawn(kind);
        for _ in 0..4 {
            let bbox = piece.bounding_box();
            let (px, py) = piece.position();
            for x in -(px + bbox.x_min)..(BOARD_WIDTH as i8 - px - bbox.x_max) {
                for y in -(py + bbox.y_min)..(BOARD_HEIGHT as i8 - py - bbox.y_max) {
                    assert!(!board.collision(&piece, x, y), "{:?} at +({}, {})", kind, x, y);
                }
            }
            piece.rotate(&board, Direction::Right);
        }
    }
}

#[test]
fn test_line_clear_table() {
    for (lines, expected) in [(1, 100), (2, 400), (3, 800), (4, 1600)] {
        let mut board = Board::new();
        for y in (BOARD_HEIGHT as usize - lines)..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y as i8, Some(PieceKind::L));
            }
        }
        let clear = board.clear_full_rows();
        assert_eq!(clear.score, expected);
        assert_eq!(clear.lines(), lines);
        assert_eq!(board.filled_count(), 0);
    }

    let mut board = Board::from_rows(&["#########."]);
    let clear = board.clear_full_rows();
    assert_eq!(clear.score, 0);
    assert!(clear.cleared_rows.is_empty());
}

#[test]
fn test_rows_above_shift_down_by_cleared_count() {
    let mut board = Board::from_rows(&[
        "#.........",
        "##########",
        ".#........",
        "##########",
        "..#.......",
    ]);

    let clear = board.clear_full_rows();
    assert_eq!(clear.cleared_rows.as_slice(), &[16, 18]);
    assert_eq!(clear.score, 400);

    // Non-full rows keep their order and sink by the rows cleared below them.
    assert!(board.is_occupied(0, 17));
    assert!(board.is_occupied(1, 18));
    assert!(board.is_occupied(2, 19));
    assert_eq!(board.filled_count(), 3);
    // Rows introduced at the top are empty.
    assert!(board.rows().take(17).all(|row| row.iter().all(|c| c.is_none())));
}

#[test]
fn test_land_writes_piece_kind() {
    let mut board = Board::new();
    let piece = Piece::new(PieceKind::S, 0, 18, true);
    let clear = board.land(&piece);
    assert_eq!(clear.score, 0);
    // S: row 0 of grid columns 1-2, row 1 of grid columns 0-1.
    assert_eq!(board.get(1, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.get(2, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_to_text() {
    let board = Board::from_rows(&["#.#......."]);
    let text = board.to_text();
    assert_eq!(text.lines().count(), BOARD_HEIGHT as usize);
    assert_eq!(text.lines().last(), Some("#.#......."));
}

#[test]
fn test_column_height_off_board_is_zero() {
    let board = Board::from_rows(&["##########", "##########"]);
    assert_eq!(board.column_height(0), 2);
    assert_eq!(board.column_height(9), 2);
    assert_eq!(board.column_height(BOARD_WIDTH as usize), 0);
    assert_eq!(board.column_height(usize::MAX), 0);
}
