//! Terminal renderer for the memory game.
//!
//! Snapshots are drawn into a plain framebuffer by [`GameView`] and flushed to
//! the terminal by [`TerminalRenderer`], which only writes the cells that
//! changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{format_time, reset_label, win_message, AnchorY, GameView, GridLayout, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
