//! Deck generator.
//!
//! A deck is every palette symbol twice, numbered in deal order and then
//! shuffled. Identifiers follow the doubled palette (`0..N` for the first copy,
//! `N..2N` for the second), so an identifier says nothing about where the tile
//! ends up on the board.

use serde::Serialize;

use crate::error::ConfigError;
use crate::rng::DeckRng;
use crate::types::{Symbol, Tile, TileId, DEFAULT_PALETTE, MIN_PALETTE_LEN};

/// Validated list of distinct symbols (at least two).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Palette(Vec<Symbol>);

impl Palette {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self, ConfigError> {
        let symbols: Vec<Symbol> = symbols.into_iter().collect();
        if symbols.len() < MIN_PALETTE_LEN {
            return Err(ConfigError::PaletteTooSmall { len: symbols.len() });
        }
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(ConfigError::DuplicateSymbol(*s));
            }
        }
        Ok(Self(symbols))
    }

    /// Parse a comma-separated list of single characters, e.g. `"A, B, C"`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let mut symbols = Vec::new();
        for (position, raw) in s.split(',').enumerate() {
            let entry = raw.trim();
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (None, _) => return Err(ConfigError::EmptySymbol { position }),
                (Some(ch), None) => symbols.push(Symbol::new(ch)),
                (Some(_), Some(_)) => return Err(ConfigError::InvalidSymbol(entry.to_string())),
            }
        }
        Self::new(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated palette; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tiles a deck built from this palette holds.
    pub fn deck_len(&self) -> usize {
        self.0.len() * 2
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.iter().copied().map(Symbol::new).collect())
    }
}

/// Build the face-down tiles for a palette, in deal order (unshuffled).
pub fn ordered_deck(palette: &Palette) -> Vec<Tile> {
    palette
        .symbols()
        .iter()
        .chain(palette.symbols().iter())
        .enumerate()
        .map(|(i, &symbol)| Tile::new(TileId(i as u32), symbol))
        .collect()
}

/// Build a shuffled deck: two copies of each symbol, ids in `[0, 2N)`.
pub fn generate_deck(palette: &Palette, rng: &mut DeckRng) -> Vec<Tile> {
    let mut tiles = ordered_deck(palette);
    rng.shuffle(&mut tiles);
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(chars: &[char]) -> Palette {
        Palette::new(chars.iter().copied().map(Symbol::new)).unwrap()
    }

    #[test]
    fn test_default_palette() {
        let p = Palette::default();
        assert_eq!(p.len(), 8);
        assert_eq!(p.deck_len(), 16);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_palette_rejects_too_few_symbols() {
        assert_eq!(
            Palette::new([Symbol::new('A')]),
            Err(ConfigError::PaletteTooSmall { len: 1 })
        );
        assert_eq!(
            Palette::new(std::iter::empty()),
            Err(ConfigError::PaletteTooSmall { len: 0 })
        );
    }

    #[test]
    fn test_palette_rejects_duplicates() {
        assert_eq!(
            Palette::new(['A', 'B', 'A'].map(Symbol::new)),
            Err(ConfigError::DuplicateSymbol(Symbol::new('A')))
        );
    }

    #[test]
    fn test_palette_parse() {
        let p = Palette::parse("A, B ,C").unwrap();
        assert_eq!(p.symbols(), &['A', 'B', 'C'].map(Symbol::new));

        assert_eq!(Palette::parse("A,,B"), Err(ConfigError::EmptySymbol { position: 1 }));
        assert_eq!(
            Palette::parse("A,BC"),
            Err(ConfigError::InvalidSymbol("BC".to_string()))
        );
        assert_eq!(Palette::parse("A"), Err(ConfigError::PaletteTooSmall { len: 1 }));
        assert_eq!(Palette::parse(""), Err(ConfigError::EmptySymbol { position: 0 }));
    }

    #[test]
    fn test_ordered_deck_doubles_palette() {
        let deck = ordered_deck(&palette(&['A', 'B']));
        let symbols: Vec<char> = deck.iter().map(|t| t.symbol.as_char()).collect();
        let ids: Vec<u32> = deck.iter().map(|t| t.unique_id.0).collect();
        assert_eq!(symbols, vec!['A', 'B', 'A', 'B']);
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert!(deck.iter().all(|t| !t.is_flipped && !t.is_matched));
    }

    #[test]
    fn test_generate_deck_integrity() {
        let p = Palette::default();
        let mut rng = DeckRng::new(12345);
        let deck = generate_deck(&p, &mut rng);

        assert_eq!(deck.len(), 16);
        for s in p.symbols() {
            assert_eq!(deck.iter().filter(|t| t.symbol == *s).count(), 2);
        }
        let mut ids: Vec<u32> = deck.iter().map(|t| t.unique_id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_generate_deck_is_deterministic() {
        let p = Palette::default();
        let a = generate_deck(&p, &mut DeckRng::new(5));
        let b = generate_deck(&p, &mut DeckRng::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_deck_shuffles() {
        let p = Palette::default();
        let ordered = ordered_deck(&p);
        // At least one of a handful of seeds must move something.
        let moved = (0..8).any(|seed| generate_deck(&p, &mut DeckRng::new(seed)) != ordered);
        assert!(moved);
    }
}
