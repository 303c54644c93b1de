//! TUI Memory (workspace facade crate).
//!
//! Re-exports the member crates as `tui_memory::{core,input,journal,term,types}`.
//! The implementation lives in dedicated crates under `crates/`.

pub use tui_memory_core as core;
pub use tui_memory_input as input;
pub use tui_memory_journal as journal;
pub use tui_memory_term as term;
pub use tui_memory_types as types;
