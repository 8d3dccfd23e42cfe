//! Terminal presentation layer.
//!
//! Renders engine snapshots into a simple framebuffer that is then flushed
//! to the terminal with crossterm. No widget toolkit is involved.
//!
//! - `GameView` is pure and unit-tested
//! - `TerminalRenderer` owns all terminal I/O
//! - Grid cells are drawn 2 chars wide to compensate for glyph aspect ratio

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockdrop_core as core;
pub use blockdrop_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
