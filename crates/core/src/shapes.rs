//! Shapes module - the 7-piece catalog and per-kind rotation rules
//!
//! Every piece lives in a 4x4 occupancy matrix indexed `[row][col]`. The
//! matrix cell (1, 1) is the pivot: it maps onto the piece's grid position.
//!
//! Rotation is not one general algorithm. Centering asymmetric shapes in a
//! 4x4 frame needs per-kind handling, so each kind carries a [`RotationRule`]:
//!
//! - square: never rotates
//! - line: toggles between two hardcoded layouts
//! - S/Z: a 3x3 transform chosen by inspecting the top row
//! - everything else: clockwise rotation of the top-left 3x3 block

use arrayvec::ArrayVec;

use crate::types::{PieceKind, PIECE_FRAME};

const E: bool = false;
const F: bool = true;

type Matrix = [[bool; PIECE_FRAME]; PIECE_FRAME];

/// 4x4 occupancy matrix of a piece, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape(Matrix);

/// Default orientation of every kind, in catalog order.
const CATALOG: [Matrix; 7] = [
    // O
    [[F, F, E, E], [F, F, E, E], [E, E, E, E], [E, E, E, E]],
    // I
    [[E, E, E, E], [F, F, F, F], [E, E, E, E], [E, E, E, E]],
    // J
    [[F, E, E, E], [F, F, F, E], [E, E, E, E], [E, E, E, E]],
    // L
    [[E, E, F, E], [F, F, F, E], [E, E, E, E], [E, E, E, E]],
    // T
    [[E, E, E, E], [F, F, F, E], [E, F, E, E], [E, E, E, E]],
    // S
    [[E, F, F, E], [F, F, E, E], [E, E, E, E], [E, E, E, E]],
    // Z
    [[F, F, E, E], [E, F, F, E], [E, E, E, E], [E, E, E, E]],
];

/// Vertical layout of the line piece: column 1, all four rows.
const LINE_VERTICAL: Matrix = [
    [E, F, E, E],
    [E, F, E, E],
    [E, F, E, E],
    [E, F, E, E],
];

impl Shape {
    /// Default orientation for a piece kind.
    pub fn for_kind(kind: PieceKind) -> Self {
        Shape(CATALOG[kind.index()])
    }

    /// Build a shape from explicit rows.
    pub const fn from_rows(rows: [[bool; PIECE_FRAME]; PIECE_FRAME]) -> Self {
        Shape(rows)
    }

    pub fn rows(&self) -> &[[bool; PIECE_FRAME]; PIECE_FRAME] {
        &self.0
    }

    /// Whether frame cell (col, row) is occupied; false outside the frame.
    pub fn is_set(&self, col: usize, row: usize) -> bool {
        row < PIECE_FRAME && col < PIECE_FRAME && self.0[row][col]
    }

    /// Occupied cells as `(col, row)` offsets inside the frame.
    pub fn occupied(&self) -> ArrayVec<(i16, i16), 16> {
        let mut out = ArrayVec::new();
        for (row, cols) in self.0.iter().enumerate() {
            for (col, &set) in cols.iter().enumerate() {
                if set {
                    out.push((col as i16, row as i16));
                }
            }
        }
        out
    }

    /// Shape after one clockwise rotation under the kind's rule.
    pub fn rotated(&self, kind: PieceKind) -> Self {
        RotationRule::for_kind(kind).apply(self)
    }
}

/// How a kind rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationRule {
    /// Square: rotation is the identity.
    Fixed,
    /// Line: horizontal <-> vertical via two stored layouts.
    LineToggle,
    /// S/Z: 3x3 transform selected from the top-row occupancy.
    Skew,
    /// J/L/T: clockwise rotation of the 3x3 block.
    Uniform,
}

impl RotationRule {
    pub fn for_kind(kind: PieceKind) -> Self {
        match kind {
            PieceKind::O => RotationRule::Fixed,
            PieceKind::I => RotationRule::LineToggle,
            PieceKind::S | PieceKind::Z => RotationRule::Skew,
            PieceKind::J | PieceKind::L | PieceKind::T => RotationRule::Uniform,
        }
    }

    pub fn apply(&self, shape: &Shape) -> Shape {
        match self {
            RotationRule::Fixed => *shape,
            RotationRule::LineToggle => toggle_line(shape),
            RotationRule::Skew => rotate_skew(shape),
            RotationRule::Uniform => rotate_uniform(shape),
        }
    }
}

fn toggle_line(shape: &Shape) -> Shape {
    // Horizontal layout starts at column 0 of row 1.
    if shape.is_set(0, 1) {
        Shape(LINE_VERTICAL)
    } else {
        Shape::for_kind(PieceKind::I)
    }
}

/// `new[p][i] = old[2 - i][p]` over the 3x3 block; the rest of the frame is kept.
fn rotate_uniform(shape: &Shape) -> Shape {
    let old = &shape.0;
    let mut out = *old;
    for i in 0..3 {
        for p in 0..3 {
            out[p][i] = old[2 - i][p];
        }
    }
    Shape(out)
}

/// With the top-left pair empty this is the uniform rotation, otherwise
/// `new[p][i] = old[i][2 - p]`. After the first rotation an S or Z piece
/// alternates between two fixed layouts.
fn rotate_skew(shape: &Shape) -> Shape {
    let old = &shape.0;
    if !old[0][0] && !old[0][1] {
        return rotate_uniform(shape);
    }
    let mut out = *old;
    for i in 0..3 {
        for p in 0..3 {
            out[p][i] = old[i][2 - p];
        }
    }
    Shape(out)
}
