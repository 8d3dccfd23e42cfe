//! Grid tests through the public API

use blockdrop::core::{ConfigError, Grid};
use blockdrop::types::{Cell, PieceKind};

fn fill_row(grid: &mut Grid, y: i16, kind: PieceKind) {
    for x in 1..grid.width() as i16 - 1 {
        grid.place(x, y, kind);
    }
}

#[test]
fn test_grid_new_has_walls_and_empty_interior() {
    let grid = Grid::new(12, 22).unwrap();
    assert_eq!(grid.width(), 12);
    assert_eq!(grid.height(), 22);

    for y in 0..22 {
        assert_eq!(grid.cell(0, y), Some(Cell::Wall));
        assert_eq!(grid.cell(11, y), Some(Cell::Wall));
        for x in 1..11 {
            assert_eq!(grid.cell(x, y), Some(Cell::Empty), "({}, {})", x, y);
        }
    }
    assert_eq!(grid.filled_interior_count(), 0);
}

#[test]
fn test_grid_rejects_bad_dimensions() {
    assert!(matches!(
        Grid::new(2, 22),
        Err(ConfigError::GridTooSmall { .. })
    ));
    assert!(matches!(
        Grid::new(12, 1000),
        Err(ConfigError::GridTooLarge { .. })
    ));
}

#[test]
fn test_out_of_bounds_counts_as_occupied() {
    let grid = Grid::new(12, 22).unwrap();
    assert!(grid.is_occupied(-1, 5));
    assert!(grid.is_occupied(12, 5));
    assert!(grid.is_occupied(5, -1));
    assert!(grid.is_occupied(5, 22));
    assert!(!grid.is_occupied(5, 21));
    assert_eq!(grid.cell(-1, 0), None);
    assert_eq!(grid.cell(0, 22), None);
}

#[test]
fn test_place_refuses_walls_and_out_of_bounds() {
    let mut grid = Grid::new(12, 22).unwrap();
    assert!(!grid.place(0, 3, PieceKind::T));
    assert!(!grid.place(11, 3, PieceKind::T));
    assert!(!grid.place(4, -1, PieceKind::T));
    assert!(grid.place(4, 3, PieceKind::T));
    assert_eq!(grid.cell(4, 3), Some(Cell::Locked(PieceKind::T)));
}

#[test]
fn test_clear_complete_rows_cascades_non_adjacent_rows() {
    let mut grid = Grid::new(12, 22).unwrap();
    fill_row(&mut grid, 21, PieceKind::I);
    grid.place(3, 20, PieceKind::J);
    fill_row(&mut grid, 19, PieceKind::I);
    grid.place(7, 18, PieceKind::Z);

    assert_eq!(grid.clear_complete_rows(), 2);
    assert_eq!(grid.cell(3, 21), Some(Cell::Locked(PieceKind::J)));
    assert_eq!(grid.cell(7, 20), Some(Cell::Locked(PieceKind::Z)));
    assert_eq!(grid.filled_interior_count(), 2);
    // Walls survive the shift.
    for y in 0..22 {
        assert_eq!(grid.cell(0, y), Some(Cell::Wall));
    }
}

#[test]
fn test_clear_row_shifts_everything_above() {
    let mut grid = Grid::new(12, 22).unwrap();
    fill_row(&mut grid, 10, PieceKind::O);
    grid.place(1, 0, PieceKind::S);
    grid.place(2, 9, PieceKind::L);

    assert!(grid.is_row_complete(10));
    assert!(grid.clear_row(10));
    assert_eq!(grid.cell(1, 1), Some(Cell::Locked(PieceKind::S)));
    assert_eq!(grid.cell(2, 10), Some(Cell::Locked(PieceKind::L)));
    // Top row refilled with walls and empties.
    assert_eq!(grid.row(0).unwrap()[0], Cell::Wall);
    assert_eq!(grid.row(0).unwrap()[1], Cell::Empty);
}

#[test]
fn test_clear_resets_interior() {
    let mut grid = Grid::new(8, 6).unwrap();
    fill_row(&mut grid, 5, PieceKind::T);
    grid.clear();
    assert_eq!(grid.filled_interior_count(), 0);
    assert_eq!(grid.cell(7, 5), Some(Cell::Wall));
}
