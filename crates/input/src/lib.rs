//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and folds them into the per-frame
//! [`crate::core::FrameInput`] the engine consumes, with DAS/ARR repeat for
//! terminals with or without key-release events.

pub mod handler;
pub mod map;

pub use blockdrop_core as core;
pub use blockdrop_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, should_quit};
