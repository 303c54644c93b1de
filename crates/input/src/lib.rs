//! Terminal input module.
//!
//! Maps `crossterm` key events onto cursor moves, confirm and reset, and keeps
//! the board cursor that turns "confirm" into
//! [`GameAction::Select`](crate::types::GameAction::Select).

pub mod cursor;
pub mod map;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use cursor::BoardCursor;
pub use map::{handle_key_event, should_quit, Direction, UiCommand};
