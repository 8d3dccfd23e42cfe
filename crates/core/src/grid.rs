//! Grid module - the walled board of locked cells
//!
//! The grid is a `width x height` board stored as a flat row-major vector
//! (`y * width + x`). Column 0 and column `width - 1` are permanent walls on
//! every row; only the interior columns `1..=width-2` ever hold pieces and only
//! they take part in completeness checks and row clears.
//!
//! Coordinates are signed (`i16`) so that probes such as `x - 1` at the left
//! wall stay representable; anything outside `[0, width) x [0, height)` is
//! reported as blocking.

use crate::config::{validate_dims, ConfigError};
use crate::types::{Cell, PieceKind};

/// The game board: locked cells plus the two wall columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with empty interior and wall columns on both sides.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        validate_dims(width, height)?;
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        };
        grid.clear();
        Ok(grid)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y), or `None` when out of bounds.
    pub fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether (x, y) blocks a piece: walls, locked cells and every
    /// out-of-bounds coordinate.
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        !matches!(self.cell(x, y), Some(Cell::Empty))
    }

    /// Write a locked piece cell.
    /// Returns false (and writes nothing) if out of bounds or on a wall.
    pub fn place(&mut self, x: i16, y: i16, kind: PieceKind) -> bool {
        match self.index(x, y) {
            Some(idx) if self.cells[idx] != Cell::Wall => {
                self.cells[idx] = Cell::Locked(kind);
                true
            }
            _ => false,
        }
    }

    fn interior(&self, y: usize) -> std::ops::Range<usize> {
        let w = self.width as usize;
        let start = y * w;
        start + 1..start + w - 1
    }

    /// A row is complete when every interior cell is non-empty.
    /// Out-of-range rows are never complete.
    pub fn is_row_complete(&self, y: i16) -> bool {
        if y < 0 || y >= self.height as i16 {
            return false;
        }
        let range = self.interior(y as usize);
        self.cells[range].iter().all(|cell| !cell.is_empty())
    }

    /// Empty the interior of row `y`, shift every row above it down by one
    /// and leave row 0 empty.
    /// Returns false if `y` is out of range.
    pub fn clear_row(&mut self, y: i16) -> bool {
        if y < 0 || y >= self.height as i16 {
            return false;
        }

        let width = self.width as usize;
        let y = y as usize;

        // Wall columns are identical on every row, so whole rows can be copied.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.blank_row(0);
        true
    }

    /// Clear every complete row and compact the rest downward in one pass.
    ///
    /// Rows are collected bottom to top with a read and a write cursor, so
    /// several simultaneous clears (adjacent or not) cascade correctly and no
    /// complete interior row survives. Returns the number of rows cleared.
    pub fn clear_complete_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut cleared = 0;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_complete(read_y as i16) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for y in 0..write_y {
            self.blank_row(y);
        }

        cleared
    }

    fn blank_row(&mut self, y: usize) {
        let w = self.width as usize;
        let start = y * w;
        let row = &mut self.cells[start..start + w];
        row.fill(Cell::Empty);
        row[0] = Cell::Wall;
        row[w - 1] = Cell::Wall;
    }

    /// Reset to the initial state: empty interior, walls on both sides.
    pub fn clear(&mut self) {
        for y in 0..self.height as usize {
            self.blank_row(y);
        }
    }

    /// Row-major view of every cell, walls included.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One full row, walls included.
    pub fn row(&self, y: i16) -> Option<&[Cell]> {
        if y < 0 || y >= self.height as i16 {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Number of locked cells on the board.
    pub fn filled_interior_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Locked(_)))
            .count()
    }

    /// Build a grid from ASCII rows for tests.
    ///
    /// `#` is a wall, `.` empty, a piece letter is a locked cell of that kind.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows[0].chars().count();
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.chars().count(), width);
            for ch in row.chars() {
                cells.push(match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Empty,
                    other => Cell::Locked(
                        PieceKind::from_str(&other.to_string()).expect("piece letter"),
                    ),
                });
            }
        }
        Self {
            width: width as u16,
            height: height as u16,
            cells,
        }
    }
}
