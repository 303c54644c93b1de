//! Game configuration.
//!
//! # Environment Variables
//!
//! - `MEMORY_SEED`: u64 seed for reproducible deals (default: random)
//! - `MEMORY_PALETTE`: comma-separated single-character symbols (default: 8 built-in symbols)
//! - `MEMORY_COLUMNS`: grid columns (default: 4)

use crate::deck::Palette;
use crate::error::ConfigError;
use crate::types::DEFAULT_COLUMNS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub palette: Palette,
    pub seed: u64,
    pub columns: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            seed: rand::random(),
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup. Unset or blank values fall back to
    /// defaults; malformed values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = value("MEMORY_SEED") {
            config.seed = raw.parse::<u64>().map_err(|_| ConfigError::InvalidSeed(raw))?;
        }

        if let Some(raw) = value("MEMORY_PALETTE") {
            config.palette = Palette::parse(&raw)?;
        }

        if let Some(raw) = value("MEMORY_COLUMNS") {
            config.columns = match raw.parse::<u16>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidColumns(raw)),
            };
        }

        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = columns.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GameConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.palette, Palette::default());
        assert_eq!(config.columns, DEFAULT_COLUMNS);
    }

    #[test]
    fn test_reads_all_values() {
        let config = GameConfig::from_lookup(lookup(&[
            ("MEMORY_SEED", " 42 "),
            ("MEMORY_PALETTE", "x,y,z"),
            ("MEMORY_COLUMNS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.palette.symbols(), &['x', 'y', 'z'].map(Symbol::new));
        assert_eq!(config.columns, 3);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = GameConfig::from_lookup(lookup(&[("MEMORY_PALETTE", "  ")])).unwrap();
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            GameConfig::from_lookup(lookup(&[("MEMORY_SEED", "abc")])),
            Err(ConfigError::InvalidSeed("abc".to_string()))
        );
        assert_eq!(
            GameConfig::from_lookup(lookup(&[("MEMORY_COLUMNS", "0")])),
            Err(ConfigError::InvalidColumns("0".to_string()))
        );
        assert_eq!(
            GameConfig::from_lookup(lookup(&[("MEMORY_PALETTE", "a,a")])),
            Err(ConfigError::DuplicateSymbol(Symbol::new('a')))
        );
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::default().with_seed(9).with_columns(0);
        assert_eq!(config.seed, 9);
        assert_eq!(config.columns, 1);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _ = GameConfig::from_env();
    }
}
