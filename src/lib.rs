//! Blockdrop (workspace facade crate).
//!
//! Re-exports the member crates under `blockdrop::{core,input,term,types}` and
//! hosts the event log used by the terminal binary.

pub mod event_log;

pub use blockdrop_core as core;
pub use blockdrop_input as input;
pub use blockdrop_term as term;
pub use blockdrop_types as types;
