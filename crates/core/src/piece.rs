//! Active piece module - the falling piece and its collision rules
//!
//! The piece's `(x, y)` is the grid position of its pivot, matrix cell (1, 1),
//! so matrix cell `(col, row)` lands on grid cell `(x - 1 + col, y - 1 + row)`.
//! All transforms are test-then-commit: a rejected move or rotation leaves
//! the piece bit-identical.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::shapes::Shape;
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
}

impl ActivePiece {
    /// New piece in its default orientation at the top-center spawn point.
    pub fn spawn(kind: PieceKind, grid_width: u16) -> Self {
        Self {
            kind,
            shape: Shape::for_kind(kind),
            x: (grid_width / 2) as i16,
            y: 0,
        }
    }

    /// Grid coordinates covered by `shape` with its pivot at (x, y).
    fn cells_for(shape: &Shape, x: i16, y: i16) -> ArrayVec<(i16, i16), 16> {
        shape
            .occupied()
            .into_iter()
            .map(|(col, row)| (x - 1 + col, y - 1 + row))
            .collect()
    }

    /// Grid coordinates of every occupied cell at the current position.
    pub fn cells(&self) -> ArrayVec<(i16, i16), 16> {
        Self::cells_for(&self.shape, self.x, self.y)
    }

    fn shape_collides(grid: &Grid, shape: &Shape, x: i16, y: i16) -> bool {
        Self::cells_for(shape, x, y)
            .iter()
            .any(|&(gx, gy)| grid.is_occupied(gx, gy))
    }

    /// Whether the piece overlaps a wall, a locked cell, or leaves the board.
    pub fn collides(&self, grid: &Grid) -> bool {
        Self::shape_collides(grid, &self.shape, self.x, self.y)
    }

    /// `collides` evaluated with the pivot at (x, y) instead.
    pub fn collides_at(&self, grid: &Grid, x: i16, y: i16) -> bool {
        Self::shape_collides(grid, &self.shape, x, y)
    }

    /// Spawn check: like `collides`, but rows above the top of the board are
    /// a free buffer. Default layouts that occupy matrix row 0 start there.
    pub fn blocked_at_spawn(&self, grid: &Grid) -> bool {
        self.cells().iter().any(|&(gx, gy)| {
            if gy < 0 {
                gx < 0 || gx >= grid.width() as i16
            } else {
                grid.is_occupied(gx, gy)
            }
        })
    }

    /// Shift horizontally by `dx` if the target position is free.
    pub fn try_shift(&mut self, grid: &Grid, dx: i16) -> bool {
        let nx = self.x + dx;
        if self.collides_at(grid, nx, self.y) {
            return false;
        }
        self.x = nx;
        true
    }

    pub fn move_left(&mut self, grid: &Grid) -> bool {
        self.try_shift(grid, -1)
    }

    pub fn move_right(&mut self, grid: &Grid) -> bool {
        self.try_shift(grid, 1)
    }

    /// Rotate clockwise under the kind's rule; rejected on collision.
    /// Returns false for the square, which never rotates.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let candidate = self.shape.rotated(self.kind);
        if candidate == self.shape {
            return false;
        }
        if Self::shape_collides(grid, &candidate, self.x, self.y) {
            return false;
        }
        self.shape = candidate;
        true
    }

    /// Whether one row further down is free.
    pub fn can_fall(&self, grid: &Grid) -> bool {
        !self.collides_at(grid, self.x, self.y + 1)
    }

    /// Write the piece into the grid at its current position.
    ///
    /// Cells above the top row cannot be stored; returns false when any were
    /// dropped, which the engine treats as a lock-out.
    pub fn lock_into(&self, grid: &mut Grid) -> bool {
        let mut all_stored = true;
        for (gx, gy) in self.cells() {
            if !grid.place(gx, gy, self.kind) {
                all_stored = false;
            }
        }
        all_stored
    }
}
