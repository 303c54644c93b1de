//! Configuration errors.
//!
//! Game input never fails: bad selections are ignored with an
//! [`IgnoreReason`](crate::session::IgnoreReason). Only configuration can be
//! rejected.

use crate::types::{Symbol, MIN_PALETTE_LEN};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("palette needs at least {min} symbols, got {len}", min = MIN_PALETTE_LEN)]
    PaletteTooSmall { len: usize },

    #[error("palette symbol {0} appears more than once")]
    DuplicateSymbol(Symbol),

    #[error("palette entry #{position} is empty")]
    EmptySymbol { position: usize },

    #[error("palette entry {0:?} must be a single character")]
    InvalidSymbol(String),

    #[error("invalid seed: {0:?}")]
    InvalidSeed(String),

    #[error("invalid column count: {0:?}")]
    InvalidColumns(String),
}
