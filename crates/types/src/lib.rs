//! Shared types module - plain data and constants used by every crate
//!
//! Nothing in here knows about the grid, terminals or time sources, so the
//! engine, the input layer and the presentation layer can all agree on the
//! same vocabulary without depending on each other.
//!
//! # Grid Dimensions
//!
//! The default board is 12 columns by 22 rows. The leftmost and rightmost
//! columns are permanent walls, which leaves 10 playable interior columns.
//!
//! - **Width**: 12 columns (indexed 0-11, interior 1-10)
//! - **Height**: 22 rows (indexed 0-21, row 0 at the top)
//! - **Spawn position**: `(width / 2, 0)`, i.e. (6, 0) on the default board
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal driver (~60 FPS) |
//! | `DEFAULT_DROP_MS` | 600 | Gravity interval while soft drop is released |
//! | `DEFAULT_FAST_DROP_MS` | 30 | Gravity interval while soft drop is held |
//! | `DEFAULT_ROTATE_COOLDOWN_MS` | 120 | Minimum time between two rotations |
//! | `DEFAULT_DAS_MS` | 150 | Hold time before a move key starts repeating |
//! | `DEFAULT_ARR_MS` | 50 | Interval between repeated moves |
//! | `SOFT_DROP_GRACE_MS` | 150 | Soft drop stays held this long after the last press |
//!
//! # Examples
//!
//! ```
//! use blockdrop_types::{Cell, GameAction, PieceKind, DEFAULT_GRID_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.piece_id(), 5);
//!
//! let cell = Cell::Locked(kind);
//! assert_eq!(Cell::from_u8(cell.to_u8()), Some(cell));
//!
//! assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
//! assert_eq!(DEFAULT_GRID_WIDTH, 12);
//! ```

/// Default grid width in cells, wall columns included.
pub const DEFAULT_GRID_WIDTH: u16 = 12;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 22;

/// Smallest width that still fits a horizontal line piece between the walls at spawn.
pub const MIN_GRID_WIDTH: u16 = 7;

/// Smallest usable grid height.
pub const MIN_GRID_HEIGHT: u16 = 4;

/// Upper bound for either grid dimension.
///
/// Keeps every coordinate (including the -1 pivot offset) inside `i16`.
pub const MAX_GRID_DIM: u16 = 256;

/// Side length of the square occupancy matrix every piece lives in.
pub const PIECE_FRAME: usize = 4;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Normal gravity interval.
pub const DEFAULT_DROP_MS: u32 = 600;

/// Gravity interval while soft drop is held.
pub const DEFAULT_FAST_DROP_MS: u32 = 30;

/// Minimum time between two accepted rotate inputs.
pub const DEFAULT_ROTATE_COOLDOWN_MS: u32 = 120;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop state timeout for terminals without key-release events.
pub const SOFT_DROP_GRACE_MS: u32 = 150;


/// The seven piece kinds, in catalog order.
///
/// The catalog index doubles as the texture/color slot and selects the
/// rotation rule:
/// - **O** (0): square, never rotates
/// - **I** (1): line, toggles between two hardcoded layouts
/// - **J** (2), **L** (3), **T** (4): uniform 3x3 clockwise rotation
/// - **S** (5), **Z** (6): occupancy-inspected 3x3 transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    J,
    L,
    T,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Catalog index (0-6).
    pub fn index(&self) -> usize {
        match self {
            PieceKind::O => 0,
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::T => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Identifier written into a locked grid cell (1-7).
    pub fn piece_id(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdrop_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// A single grid cell.
///
/// - `Empty`: free space
/// - `Locked(kind)`: part of a piece that has been committed to the grid
/// - `Wall`: one of the permanent side columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Locked(PieceKind),
    Wall,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Compact encoding: 0 = empty, 1-7 = piece id, 8 = wall.
    pub fn to_u8(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Locked(kind) => kind.piece_id(),
            Cell::Wall => 8,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Cell::Empty),
            1..=7 => PieceKind::from_index(v as usize - 1).map(Cell::Locked),
            8 => Some(Cell::Wall),
            _ => None,
        }
    }
}

/// Discrete actions the engine accepts from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece clockwise
    RotateCw,
    /// Hold-to-accelerate gravity; as a one-shot action it runs one gravity step
    SoftDrop,
    /// Start a new session on an empty grid
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdrop_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softdrop"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "softdrop" => Some(GameAction::SoftDrop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::SoftDrop => "softDrop",
            GameAction::Restart => "restart",
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopOut {
    /// A freshly spawned piece overlaps locked cells.
    BlockOut,
    /// A piece locked while part of it was still above the top row.
    LockOut,
}

impl TopOut {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopOut::BlockOut => "blockOut",
            TopOut::LockOut => "lockOut",
        }
    }
}

/// Engine lifecycle state. There is no separate locking or clearing state:
/// both happen synchronously inside a gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    GameOver(TopOut),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver(_))
    }
}
