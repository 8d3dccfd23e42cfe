use arrayvec::ArrayVec;

use crate::shapes::Shape;
use crate::types::{Cell, GameStatus, PieceKind};

/// Read-only copy of everything a presenter needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major, `y * width + x`.
    pub cells: Vec<Cell>,
    pub active_kind: PieceKind,
    pub active_shape: Shape,
    /// Grid position of the active piece's pivot.
    pub position: (i16, i16),
    pub status: GameStatus,
    pub soft_drop: bool,
    pub pieces_spawned: u32,
    pub lines_cleared: u32,
}

impl EngineSnapshot {
    pub fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Grid coordinates of the active piece's cells, including any above row 0.
    pub fn active_cells(&self) -> ArrayVec<(i16, i16), 16> {
        let (x, y) = self.position;
        self.active_shape
            .occupied()
            .into_iter()
            .map(|(col, row)| (x - 1 + col, y - 1 + row))
            .collect()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active_kind: PieceKind::O,
            active_shape: Shape::for_kind(PieceKind::O),
            position: (0, 0),
            status: GameStatus::Playing,
            soft_drop: false,
            pieces_spawned: 0,
            lines_cleared: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Engine, EngineConfig};

    #[test]
    fn test_snapshot_into_reuses_buffer() {
        let engine = Engine::new(EngineConfig::default(), 5).unwrap();
        let mut snap = EngineSnapshot::default();
        engine.snapshot_into(&mut snap);
        let cap = snap.cells.capacity();
        let ptr = snap.cells.as_ptr();
        engine.snapshot_into(&mut snap);
        assert_eq!(snap.cells.capacity(), cap);
        assert_eq!(snap.cells.as_ptr(), ptr);
    }

    #[test]
    fn test_active_cells_match_engine() {
        let engine = Engine::new(EngineConfig::default(), 5).unwrap();
        let snap = engine.snapshot();
        assert_eq!(snap.active_cells(), engine.active().cells());
    }

    #[test]
    fn test_cell_lookup() {
        let engine = Engine::new(EngineConfig::default(), 5).unwrap();
        let snap = engine.snapshot();
        assert_eq!(snap.cell(0, 0), Some(Cell::Wall));
        assert_eq!(snap.cell(1, 0), Some(Cell::Empty));
        assert_eq!(snap.cell(-1, 0), None);
        assert_eq!(snap.cell(0, 22), None);
    }
}
