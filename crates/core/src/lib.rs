//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and has no dependency on terminals or I/O.
//! A seed reproduces a whole session, so tests and replays are exact.
//!
//! # Module Structure
//!
//! - [`grid`]: walled cell grid with bounds checks and row clearing
//! - [`shapes`]: the seven 4x4 piece matrices and their rotation rules
//! - [`piece`]: the falling piece and its test-then-commit transforms
//! - [`engine`]: frame driver, gravity, locking, spawning and game over
//! - [`rng`]: seeded uniform piece selection
//! - [`config`]: engine configuration and construction errors
//! - [`snapshot`]: read-only state copy for presenters
//!
//! # Game Rules
//!
//! - Two wall columns bound the playfield; the floor is the bottom edge.
//! - A piece that cannot fall locks at once (no lock delay).
//! - Complete interior rows are removed and everything above shifts down.
//! - Rotation is clockwise only and simply rejected on collision (no kicks).
//! - A blocked spawn, or a lock above the top row, ends the session.
//!
//! # Example
//!
//! ```
//! use blockdrop_core::{Engine, EngineConfig, FrameInput};
//!
//! let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();
//!
//! let input = FrameInput { move_right: true, ..FrameInput::default() };
//! engine.frame(16, input);
//!
//! assert!(!engine.is_over());
//! ```
//!
//! Call [`Engine::frame`] once per tick with the elapsed milliseconds.

pub mod config;
pub mod engine;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockdrop_types as types;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, FrameInput, FrameOutcome, LockEvent, StepOutcome};
pub use grid::Grid;
pub use piece::ActivePiece;
pub use rng::SimpleRng;
pub use shapes::{RotationRule, Shape};
pub use snapshot::EngineSnapshot;
