//! Shared types module - plain data structures and constants
//!
//! Everything here is plain data that the core, the terminal view, the input
//! layer and the journal all agree on. No game rules live in this crate.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Main loop frame interval (~60 FPS) |
//! | `MISMATCH_REVEAL_MS` | 1000 | How long a mismatched pair stays face up |
//! | `CLOCK_TICK_MS` | 1000 | Interval of the elapsed-time ticker |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{GameAction, Symbol, TileId, DEFAULT_PALETTE};
//!
//! let action = GameAction::from_str("select:3").unwrap();
//! assert_eq!(action, GameAction::Select(TileId(3)));
//!
//! assert_eq!(DEFAULT_PALETTE.len(), 8);
//! assert_eq!(Symbol::new('★').as_char(), '★');
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Main loop frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Delay before a mismatched pair is turned face down again.
pub const MISMATCH_REVEAL_MS: u32 = 1000;

/// Interval of the elapsed-time ticker.
pub const CLOCK_TICK_MS: u32 = 1000;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u16 = 4;

/// Minimum number of distinct symbols in a palette.
pub const MIN_PALETTE_LEN: usize = 2;

/// Reference palette (8 symbols, 16 tiles).
pub const DEFAULT_PALETTE: [char; 8] = ['☾', '★', '◉', '▲', '◆', '✦', '☀', '●'];

/// Face value of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    pub const fn new(ch: char) -> Self {
        Self(ch)
    }

    pub const fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for Symbol {
    fn from(ch: char) -> Self {
        Self(ch)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a tile, assigned once when the deck is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One card position on the board.
///
/// `is_matched` implies `is_flipped`; the reverse does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub unique_id: TileId,
    pub symbol: Symbol,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Tile {
    /// Create a face-down, unmatched tile.
    pub const fn new(unique_id: TileId, symbol: Symbol) -> Self {
        Self {
            unique_id,
            symbol,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Whether the symbol should be shown.
    pub fn face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }
}

/// Lifecycle phase of a session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// No tile has been selected yet.
    NotStarted,
    /// Zero or one tile selected, input open.
    AwaitingSecondPick,
    /// A mismatched pair is face up; input locked until it is concealed.
    Resolving,
    /// All pairs found. Terminal.
    Won,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "notStarted",
            Phase::AwaitingSecondPick => "awaitingSecondPick",
            Phase::Resolving => "resolving",
            Phase::Won => "won",
        }
    }
}

/// Game actions accepted by the controller.
///
/// These are the only two inputs the game understands. Everything the
/// terminal does (cursor movement, quitting) stays outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Select (flip) the tile with the given identifier.
    Select(TileId),
    /// Throw away the current session and deal a new one.
    Reset,
}

impl GameAction {
    /// Parse an action from its textual form (`select:<id>` or `reset`).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_memory_types::{GameAction, TileId};
    ///
    /// assert_eq!(GameAction::from_str("reset"), Some(GameAction::Reset));
    /// assert_eq!(GameAction::from_str("select:0"), Some(GameAction::Select(TileId(0))));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower == "reset" {
            return Some(GameAction::Reset);
        }
        let id = lower.strip_prefix("select:")?;
        id.parse::<u32>().ok().map(|v| GameAction::Select(TileId(v)))
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameAction::Select(id) => write!(f, "select:{}", id),
            GameAction::Reset => f.write_str("reset"),
        }
    }
}
