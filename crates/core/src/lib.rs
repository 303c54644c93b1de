//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every rule of the memory game. It has **no dependencies**
//! on the terminal, on input devices or on I/O, which keeps it:
//!
//! - **Deterministic**: a seed fixes every deal, across resets
//! - **Testable**: time is injected through [`Game::advance`], never read from a clock
//! - **Total**: bad input is ignored with a reason, never a panic or an error
//!
//! # Module Structure
//!
//! - [`deck`]: palette validation and the shuffled deck generator
//! - [`rng`]: seeded ChaCha8 stream with an explicit Fisher-Yates shuffle
//! - [`session`]: the selection / match / mismatch state machine for one deal
//! - [`timers`]: epoch-tagged timer queue driven by the loop clock
//! - [`game`]: the controller owning the live session, its timers and its event log
//! - [`snapshot`]: read-only view handed to renderers
//! - [`config`]: palette, seed and grid settings from the environment
//!
//! # Game Rules
//!
//! - Each palette symbol appears on exactly two tiles
//! - Two face-up tiles are resolved at once: a move is counted either way
//! - A match stays face up for good and input reopens immediately
//! - A mismatch stays visible for 1000ms with input locked, then flips back
//! - The clock starts with the first selection and stops on the win
//! - The win is terminal; only a reset deals a new board
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{Game, GameConfig};
//! use tui_memory_types::{GameAction, TileId};
//!
//! let mut game = Game::new(&GameConfig::default().with_seed(7));
//! game.apply_action(GameAction::Select(TileId(0)));
//!
//! let snap = game.snapshot();
//! assert!(snap.started);
//! assert_eq!(snap.move_count, 0);
//!
//! // Loop time drives the clock.
//! game.advance(1000);
//! assert_eq!(game.snapshot().elapsed_seconds, 1);
//! ```

pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod timers;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use deck::{generate_deck, ordered_deck, Palette};
pub use error::ConfigError;
pub use game::{Game, GameEvent, EVENT_BACKLOG};
pub use rng::DeckRng;
pub use session::{IgnoreReason, PendingReveal, SelectOutcome, Selected, Session};
pub use snapshot::GameSnapshot;
pub use timers::{Timer, TimerKind, Timers};
