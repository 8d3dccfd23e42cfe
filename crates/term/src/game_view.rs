//! GameView: maps an `EngineSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::EngineSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, GameStatus, PieceKind, TopOut};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 14;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the playfield.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left terminal position of the grid for a given snapshot.
    pub fn origin(&self, snap: &EngineSnapshot, viewport: Viewport) -> (u16, u16) {
        let (px_w, px_h) = self.board_size(snap);
        let start_x = viewport.width.saturating_sub(px_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(px_h) / 2,
            AnchorY::Top => 0,
        };
        (start_x, start_y)
    }

    /// Grid size in terminal cells, including the floor row.
    fn board_size(&self, snap: &EngineSnapshot) -> (u16, u16) {
        (
            snap.width.saturating_mul(self.cell_w),
            snap.height.saturating_mul(self.cell_h).saturating_add(1),
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &EngineSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let (start_x, start_y) = self.origin(snap, viewport);
        let (px_w, px_h) = self.board_size(snap);

        for y in 0..snap.height as i16 {
            for x in 0..snap.width as i16 {
                match snap.cell(x, y) {
                    Some(Cell::Wall) => self.draw_wall_cell(fb, start_x, start_y, x as u16, y as u16),
                    Some(Cell::Locked(kind)) => {
                        self.draw_piece_cell(fb, start_x, start_y, x as u16, y as u16, kind)
                    }
                    _ => self.draw_empty_cell(fb, start_x, start_y, x as u16, y as u16),
                }
            }
        }

        // Floor.
        fb.fill_rect(start_x, start_y + px_h - 1, px_w, 1, '▀', wall_style());

        if !snap.is_over() {
            for (x, y) in snap.active_cells() {
                // Rows above the top are off-screen.
                if x >= 0 && y >= 0 && x < snap.width as i16 && y < snap.height as i16 {
                    self.draw_piece_cell(fb, start_x, start_y, x as u16, y as u16, snap.active_kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + px_w + 2, start_y);

        if let GameStatus::GameOver(reason) = snap.status {
            self.draw_overlay(fb, start_x, start_y, px_w, px_h, reason);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &EngineSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_wall_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        self.fill_cell_rect(fb, start_x, start_y, x, y, '▓', wall_style());
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_piece_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), PLAYFIELD_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + cell_x * self.cell_w;
        let py = start_y + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &EngineSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let help = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "PIECES", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.pieces_spawned, value);
        y += 2;

        fb.put_str(panel_x, y, "LINES", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.lines_cleared, value);
        y += 2;

        fb.put_str(panel_x, y, "DROP", label);
        y += 1;
        fb.put_str(panel_x, y, if snap.soft_drop { "fast" } else { "normal" }, value);
        y += 2;

        for line in [
            "<- -> move",
            "up    rotate",
            "down  drop",
            "r     restart",
            "q/esc quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        px_w: u16,
        px_h: u16,
        reason: TopOut,
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let sub = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let mid_y = start_y.saturating_add(px_h / 2);

        let lines: [(&str, CellStyle); 3] = [
            ("GAME OVER", style),
            (reason_text(reason), sub),
            ("r to restart", sub),
        ];
        for (i, (text, st)) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(px_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y.saturating_add(i as u16), text, *st);
        }
    }
}

fn wall_style() -> CellStyle {
    CellStyle::new(Rgb::new(120, 120, 130), Rgb::new(0, 0, 0))
}

fn reason_text(reason: TopOut) -> &'static str {
    match reason {
        TopOut::BlockOut => "no room to spawn",
        TopOut::LockOut => "locked above top",
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Engine, EngineConfig};

    fn view() -> GameView {
        GameView::default().with_anchor_y(AnchorY::Top)
    }

    fn snapshot() -> EngineSnapshot {
        Engine::new(EngineConfig::default(), 3).unwrap().snapshot()
    }

    #[test]
    fn test_walls_and_floor_are_drawn() {
        let snap = snapshot();
        let vp = Viewport::new(60, 30);
        let fb = view().render(&snap, vp);
        let (sx, _) = view().origin(&snap, vp);
        assert_eq!(sx, 18);

        for y in 0..22 {
            assert_eq!(fb.get(sx, y).unwrap().ch, '▓');
            assert_eq!(fb.get(sx + 23, y).unwrap().ch, '▓');
        }
        assert_eq!(fb.get(sx + 5, 22).unwrap().ch, '▀');
    }

    #[test]
    fn test_locked_cell_uses_piece_color() {
        let mut snap = snapshot();
        let idx = 21 * 12 + 3;
        snap.cells[idx] = Cell::Locked(PieceKind::Z);
        let vp = Viewport::new(60, 30);
        let fb = view().render(&snap, vp);
        let (sx, sy) = view().origin(&snap, vp);

        let g = fb.get(sx + 3 * 2, sy + 21).unwrap();
        assert_eq!(g.ch, '█');
        assert_eq!(g.style.fg, piece_color(PieceKind::Z));
        assert_eq!(fb.get(sx + 3 * 2 + 1, sy + 21).unwrap().ch, '█');
    }

    #[test]
    fn test_active_piece_above_top_is_skipped() {
        let mut snap = snapshot();
        snap.active_kind = PieceKind::O;
        snap.active_shape = crate::core::Shape::for_kind(PieceKind::O);
        snap.position = (6, 0);
        let vp = Viewport::new(60, 30);
        let fb = view().render(&snap, vp);
        let (sx, _) = view().origin(&snap, vp);

        // Row 0 shows the lower half of the square at columns 5 and 6.
        let row = fb.row_text(0);
        let board: String = row.chars().skip(sx as usize).take(24).collect();
        let dots = "·".repeat(8);
        assert_eq!(board, format!("▓▓{dots}████{dots}▓▓"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut snap = snapshot();
        snap.status = GameStatus::GameOver(TopOut::BlockOut);
        let fb = view().render(&snap, Viewport::new(60, 30));
        let text: String = (0..30).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("r to restart"));
    }

    #[test]
    fn test_panel_shows_counters() {
        let snap = snapshot();
        let fb = view().render(&snap, Viewport::new(60, 30));
        assert!(fb.row_text(0).contains("PIECES"));
        assert!(fb.row_text(1).contains('1'));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = snapshot();
        let fb = view().render(&snap, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
