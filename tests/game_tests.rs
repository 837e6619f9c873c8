//! Board state machine tests - spawn, fall, rotate, slam, lock, clear, game over

use text_tetris::core::{
    Board, BoardConfig, Grid, Piece, ScriptedSource, ShapeCatalog, ShapeDef, TetrisError,
};
use text_tetris::types::{BoardState, MinoOffset, Position, ShapeKind};

const SQUARE: usize = 0;
const LINE: usize = 1;

fn board(width: u16, height: u16, picks: &[usize]) -> Board<ScriptedSource> {
    Board::with_source(
        width,
        height,
        ShapeCatalog::standard(),
        ScriptedSource::new(picks.to_vec()),
    )
    .unwrap()
}

fn board_with(rows: &[&str], picks: &[usize]) -> Board<ScriptedSource> {
    Board::with_grid(
        Grid::from_rows(rows).unwrap(),
        ShapeCatalog::standard(),
        ScriptedSource::new(picks.to_vec()),
    )
}

fn lines<S: text_tetris::core::ShapeSource>(board: &Board<S>) -> Vec<String> {
    board.snapshot().lines().collect()
}

fn anchor<S: text_tetris::core::ShapeSource>(board: &Board<S>) -> Position {
    board.active().expect("active piece").anchor()
}

// ============== Construction ==============

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(16, 25).unwrap();

    assert_eq!(board.width(), 16);
    assert_eq!(board.height(), 25);
    assert_eq!(board.state(), BoardState::Empty);
    assert!(!board.have_active_piece());
    assert!(!board.is_game_over());

    let snap = board.snapshot();
    assert_eq!(snap.rows.len(), 25);
    assert!(snap.rows.iter().all(|r| r.len() == 16 && r.iter().all(|&c| c == ' ')));
}

#[test]
fn test_new_rejects_bad_dimensions() {
    assert_eq!(
        Board::new(0, 25).unwrap_err(),
        TetrisError::InvalidDimensions {
            width: 0,
            height: 25
        }
    );
    assert!(Board::new(16, 0).is_err());
}

#[test]
fn test_from_config() {
    let board = Board::from_config(&BoardConfig::new(10, 12).with_seed(5)).unwrap();
    assert_eq!((board.width(), board.height()), (10, 12));

    assert!(Board::from_config(&BoardConfig::new(10, 0)).is_err());
}

// ============== Spawn and fall ==============

#[test]
fn test_first_tick_spawns_at_top_middle() {
    for (pick, kind) in [(SQUARE, ShapeKind::Square), (LINE, ShapeKind::Line)] {
        let mut board = board(16, 25, &[pick]);
        board.tick();

        assert_eq!(board.state(), BoardState::Falling);
        assert_eq!(board.pieces_spawned(), 1);

        let active = board.active().unwrap();
        assert_eq!(active.piece().kind(), kind);
        assert_eq!(active.piece().rotation(), 0);
        assert_eq!(active.anchor(), Position::new(0, 8));

        for pos in active.footprint(0) {
            assert!(board.grid().is_occupied(pos));
        }
        assert_eq!(board.grid().occupied_count(), 4);
    }
}

#[test]
fn test_spawn_column_rounds_down() {
    let mut board = board(5, 6, &[SQUARE]);
    board.tick();
    assert_eq!(anchor(&board), Position::new(0, 2));
}

#[test]
fn test_tick_moves_active_piece_down() {
    let mut board = board(16, 25, &[SQUARE]);
    board.tick();
    board.tick();
    board.tick();

    assert_eq!(anchor(&board), Position::new(2, 8));
    assert_eq!(board.grid().occupied_count(), 4);
    assert!(board.grid().is_occupied(Position::new(2, 8)));
    assert!(board.grid().is_occupied(Position::new(3, 9)));
    assert!(!board.grid().is_occupied(Position::new(1, 8)));
}

#[test]
fn test_end_to_end_tick_tick_rotate() {
    let catalog = ShapeCatalog::standard();

    for (pick, kind) in [(SQUARE, "square"), (LINE, "line")] {
        let mut board = board(16, 25, &[pick]);
        board.tick();
        board.tick();
        assert!(board.rotate(1));

        let piece = Piece::from_name(&catalog, kind).unwrap();
        let mut expected = vec![vec![' '; 16]; 25];
        for &(col, row) in piece.occupied_offsets(1) {
            expected[1 + row as usize][8 + col as usize] = 'X';
        }

        let snap = board.snapshot();
        assert_eq!(snap.rows, expected, "shape {}", kind);

        let active = snap.active.unwrap();
        assert_eq!(active.anchor, Position::new(1, 8));
        assert_eq!(active.rotation, 1 % piece.state_count());
    }
}

// ============== Rotation and shifting ==============

#[test]
fn test_rotate_blocked_by_wall_is_atomic() {
    let mut board = board(16, 25, &[LINE]);
    board.tick();
    assert!(board.rotate(1));
    assert!(board.shift(7));
    assert_eq!(anchor(&board), Position::new(0, 15));

    let before = board.snapshot();
    assert!(!board.rotate(1));
    assert!(!board.rotate(-1));

    assert_eq!(board.snapshot(), before);
    assert_eq!(board.active().unwrap().piece().rotation(), 1);
}

#[test]
fn test_rotate_blocked_by_locked_cell_is_atomic() {
    let mut grid = Grid::new(16, 25).unwrap();
    grid.set_point(Position::new(2, 8));
    let mut board = Board::with_grid(grid, ShapeCatalog::standard(), ScriptedSource::repeat(LINE));

    board.tick();
    let before = board.grid().clone();

    assert!(!board.rotate(1));
    assert_eq!(board.grid(), &before);
    assert_eq!(anchor(&board), Position::new(0, 8));
    assert_eq!(board.active().unwrap().piece().rotation(), 0);
}

#[test]
fn test_rotate_negative_delta() {
    let mut board = board(16, 25, &[LINE]);
    board.tick();

    assert!(board.rotate(-1));
    assert_eq!(board.active().unwrap().piece().rotation(), 1);
    assert!(board.rotate(-3));
    assert_eq!(board.active().unwrap().piece().rotation(), 0);
}

#[test]
fn test_shift_stops_at_walls() {
    let mut board = board(16, 25, &[SQUARE]);
    board.tick();

    assert!(board.shift(-8));
    assert_eq!(anchor(&board), Position::new(0, 0));
    assert!(!board.shift(-1));
    assert_eq!(anchor(&board), Position::new(0, 0));

    assert!(board.shift(14));
    assert_eq!(anchor(&board), Position::new(0, 14));
    assert!(!board.shift(1));
    assert_eq!(board.grid().occupied_count(), 4);
}

#[test]
fn test_shift_by_extreme_delta_is_rejected() {
    let mut board = board(16, 25, &[LINE]);
    board.tick();
    let before = board.grid().clone();

    assert!(!board.shift(i16::MAX));
    assert!(!board.shift(i16::MIN));
    assert!(!board.shift(i16::MAX - 8));
    assert_eq!(board.grid(), &before);
    assert_eq!(anchor(&board), Position::new(0, 8));
    assert!(board.have_active_piece());
}

#[test]
fn test_actions_without_active_piece_are_noops() {
    let mut board = board(16, 25, &[SQUARE]);

    assert!(!board.rotate(1));
    assert!(!board.shift(1));
    assert_eq!(board.slam(), 0);
    assert_eq!(board.state(), BoardState::Empty);
    assert_eq!(board.grid().occupied_count(), 0);
}

// ============== Slam and locking ==============

#[test]
fn test_slam_square_locks_at_bottom() {
    let mut board = board(16, 25, &[SQUARE]);
    board.tick();

    assert_eq!(board.slam(), 23);
    assert!(!board.have_active_piece());
    assert_eq!(board.state(), BoardState::Empty);

    for pos in [(23, 8), (23, 9), (24, 8), (24, 9)] {
        assert!(board.grid().is_occupied(Position::new(pos.0, pos.1)));
    }
    assert_eq!(board.grid().occupied_count(), 4);

    let event = board.last_lock().unwrap();
    assert_eq!(event.kind, ShapeKind::Square);
    assert_eq!(event.anchor, Position::new(23, 8));
}

#[test]
fn test_slam_line_lands_flat() {
    let mut board = board(16, 25, &[LINE]);
    board.tick();

    assert_eq!(board.slam(), 24);
    assert_eq!(lines(&board)[24], "        XXXX    ");
}

#[test]
fn test_slam_terminates_for_every_height() {
    for height in 1..=40 {
        let mut board = board(4, height, &[SQUARE]);
        board.tick();
        board.slam();
        assert!(!board.have_active_piece(), "height {}", height);
        assert_eq!(board.is_game_over(), height < 2);
    }
}

#[test]
fn test_next_tick_after_lock_spawns_from_source() {
    let mut board = board(16, 25, &[SQUARE, LINE]);
    board.tick();
    board.slam();

    board.tick();
    assert_eq!(board.active().unwrap().piece().kind(), ShapeKind::Line);
    assert_eq!(anchor(&board), Position::new(0, 8));
    assert_eq!(board.pieces_spawned(), 2);
}

// ============== Row clearing ==============

#[test]
fn test_row_clear_shifts_middle_row_down() {
    let mut board = board_with(&["    ", "X   ", "XX  "], &[SQUARE]);

    board.tick(); // spawn at (0, 2)
    board.tick(); // (1, 2)
    board.tick(); // blocked below: lock

    assert!(!board.have_active_piece());
    assert_eq!(lines(&board), ["    ", "    ", "X XX"]);
    assert_eq!(board.rows_cleared(), 1);
    assert_eq!(board.last_lock().unwrap().cleared_rows, vec![2]);
}

#[test]
fn test_row_clear_single_gap_in_bottom_row() {
    let dot: &[MinoOffset] = &[(0, 0)];
    let catalog = ShapeCatalog::new(vec![ShapeDef::new(ShapeKind::Square, &[dot]).unwrap()]).unwrap();
    let grid = Grid::from_rows(&["    ", "XX X", "XX X"]).unwrap();
    let mut board = Board::with_grid(grid, catalog, ScriptedSource::repeat(0));

    board.tick();
    assert_eq!(board.slam(), 2);

    // Bottom row completed and removed; the middle row settles into its place.
    assert_eq!(lines(&board), ["    ", "    ", "XX X"]);
    assert_eq!(board.rows_cleared(), 1);
}

#[test]
fn test_multi_row_clear_keeps_order_of_remaining_rows() {
    let mut board = board_with(
        &[
            "        ",
            "        ",
            "        ",
            "        ",
            "XXXXXXX ",
            " XXXXXX ",
            "XXXXXXX ",
            "XXXXXXX ",
        ],
        &[LINE],
    );

    board.tick();
    assert!(board.rotate(1));
    assert!(board.shift(3));
    assert_eq!(board.slam(), 4);

    let expected = [
        "        ",
        "        ",
        "        ",
        "        ",
        "        ",
        "        ",
        "        ",
        " XXXXXXX",
    ];
    assert_eq!(lines(&board), expected);
    assert_eq!(board.rows_cleared(), 3);
    assert_eq!(board.last_lock().unwrap().cleared_rows, vec![7, 6, 4]);
}

#[test]
fn test_two_squares_clear_two_rows_and_play_continues() {
    let mut board = board(4, 6, &[SQUARE]);

    board.tick();
    assert!(board.shift(-2));
    board.slam();
    board.tick();
    board.slam();

    assert_eq!(board.grid().occupied_count(), 0);
    assert_eq!(board.rows_cleared(), 2);
    assert_eq!(board.state(), BoardState::Empty);

    board.tick();
    assert_eq!(board.state(), BoardState::Falling);
}

// ============== Game over ==============

#[test]
fn test_blocked_spawn_is_game_over_and_stamps_nothing() {
    let mut grid = Grid::new(16, 25).unwrap();
    grid.set_point(Position::new(1, 9));
    let mut board = Board::with_grid(grid, ShapeCatalog::standard(), ScriptedSource::repeat(SQUARE));
    let before = board.grid().clone();

    board.tick();

    assert!(board.is_game_over());
    assert_eq!(board.state(), BoardState::GameOver);
    assert!(!board.have_active_piece());
    assert_eq!(board.pieces_spawned(), 0);
    assert_eq!(board.grid(), &before);
    assert!(board.snapshot().game_over);
}

#[test]
fn test_spawn_past_right_wall_is_game_over() {
    // A horizontal line at col 2 needs cols 2..=5 on a 4-wide board.
    let mut board = board(4, 10, &[LINE]);
    board.tick();

    assert!(board.is_game_over());
    assert_eq!(board.grid().occupied_count(), 0);
}

#[test]
fn test_stacking_to_the_top_ends_game() {
    let mut board = board(16, 25, &[SQUARE]);

    for _ in 0..100 {
        board.tick();
        board.slam();
        if board.is_game_over() {
            break;
        }
    }

    assert!(board.is_game_over());
    assert_eq!(board.pieces_spawned(), 12);
    assert_eq!(board.grid().occupied_count(), 48);
}

#[test]
fn test_game_over_is_terminal() {
    let mut grid = Grid::new(16, 25).unwrap();
    grid.set_point(Position::new(0, 8));
    let mut board = Board::with_grid(grid, ShapeCatalog::standard(), ScriptedSource::repeat(SQUARE));
    board.tick();
    assert!(board.is_game_over());
    let before = board.snapshot();

    board.tick();
    assert!(!board.rotate(1));
    assert!(!board.shift(-1));
    assert_eq!(board.slam(), 0);
    assert!(!board.spawn_new_piece());

    assert_eq!(board.snapshot(), before);
    assert_eq!(board.state(), BoardState::GameOver);
}

// ============== Determinism ==============

#[test]
fn test_seeded_boards_are_reproducible() {
    let mut a = Board::with_seed(16, 25, 99).unwrap();
    let mut b = Board::with_seed(16, 25, 99).unwrap();

    for step in 0..300 {
        for board in [&mut a, &mut b] {
            board.tick();
            if step % 5 == 0 {
                board.rotate(1);
            }
            if step % 7 == 0 {
                board.shift(if step % 2 == 0 { -3 } else { 3 });
            }
            if step % 11 == 0 {
                board.slam();
            }
        }
        assert_eq!(a.snapshot(), b.snapshot(), "diverged at step {}", step);
    }
}
