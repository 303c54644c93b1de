//! Session module - the match-resolution state machine
//!
//! A [`Session`] is one deal, from the first face-down board to the win. It
//! accepts tile selections, resolves every completed pair immediately, and
//! hands mismatches back to the caller as a [`PendingReveal`] that has to be
//! applied (via [`Session::conceal`]) once the reveal delay has passed.
//!
//! Sessions never reset in place. The controller builds a new one and bumps
//! the epoch, which turns any reveal still in flight into a no-op.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::deck::{generate_deck, Palette};
use crate::rng::DeckRng;
use crate::types::{Phase, Symbol, Tile, TileId};

/// Why a selection was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IgnoreReason {
    /// No tile with that identifier on the board.
    UnknownTile,
    /// Two tiles are face up and waiting to be resolved.
    Locked,
    AlreadyMatched,
    AlreadyFlipped,
    /// The session is over.
    GameWon,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::UnknownTile => "unknownTile",
            IgnoreReason::Locked => "locked",
            IgnoreReason::AlreadyMatched => "alreadyMatched",
            IgnoreReason::AlreadyFlipped => "alreadyFlipped",
            IgnoreReason::GameWon => "gameWon",
        }
    }
}

/// A face-up tile waiting for its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Selected {
    pub unique_id: TileId,
    pub symbol: Symbol,
}

/// Deferred flip-back of a mismatched pair, bound to the session that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PendingReveal {
    pub epoch: u64,
    pub tiles: [TileId; 2],
}

/// Result of [`Session::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    /// First tile of a pair turned face up.
    Revealed(Selected),
    /// Second tile matched the first.
    Matched { symbol: Symbol, won: bool },
    /// Second tile did not match; the pair must be concealed later.
    Mismatched(PendingReveal),
}

impl SelectOutcome {
    pub fn accepted(&self) -> bool {
        !matches!(self, SelectOutcome::Ignored(_))
    }
}

/// One live game instance.
#[derive(Debug, Clone)]
pub struct Session {
    epoch: u64,
    seed: u64,
    tiles: Vec<Tile>,
    selection: ArrayVec<Selected, 2>,
    input_locked: bool,
    matches_found: u32,
    move_count: u32,
    elapsed_seconds: u32,
    started: bool,
}

impl Session {
    /// Deal a fresh, shuffled session.
    pub fn deal(palette: &Palette, seed: u64, epoch: u64) -> Self {
        let mut rng = DeckRng::new(seed);
        let tiles = generate_deck(palette, &mut rng);
        let mut session = Self::from_tiles(tiles, epoch);
        session.seed = seed;
        session
    }

    /// Build a session over an already arranged board.
    ///
    /// The caller is responsible for the deck shape (every symbol exactly
    /// twice, distinct identifiers). Flags on the given tiles are cleared.
    pub fn from_tiles(tiles: Vec<Tile>, epoch: u64) -> Self {
        let tiles = tiles
            .into_iter()
            .map(|t| Tile::new(t.unique_id, t.symbol))
            .collect();
        Self {
            epoch,
            seed: 0,
            tiles,
            selection: ArrayVec::new(),
            input_locked: false,
            matches_found: 0,
            move_count: 0,
            elapsed_seconds: 0,
            started: false,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.unique_id == id)
    }

    pub fn selection(&self) -> &[Selected] {
        &self.selection
    }

    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn matches_found(&self) -> u32 {
        self.matches_found
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn total_pairs(&self) -> u32 {
        (self.tiles.len() / 2) as u32
    }

    pub fn is_won(&self) -> bool {
        !self.tiles.is_empty() && self.matches_found == self.total_pairs()
    }

    pub fn phase(&self) -> Phase {
        if self.is_won() {
            Phase::Won
        } else if !self.started {
            Phase::NotStarted
        } else if self.input_locked {
            Phase::Resolving
        } else {
            Phase::AwaitingSecondPick
        }
    }

    /// Turn a tile face up.
    ///
    /// A second accepted selection resolves the pair on the spot: the move is
    /// counted, a match is committed, and a mismatch locks the board until the
    /// returned [`PendingReveal`] is concealed.
    pub fn select(&mut self, id: TileId) -> SelectOutcome {
        if self.is_won() {
            return SelectOutcome::Ignored(IgnoreReason::GameWon);
        }
        let Some(index) = self.tiles.iter().position(|t| t.unique_id == id) else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownTile);
        };
        if self.input_locked {
            return SelectOutcome::Ignored(IgnoreReason::Locked);
        }

        let tile = &mut self.tiles[index];
        if tile.is_matched {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }
        if tile.is_flipped {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyFlipped);
        }

        tile.is_flipped = true;
        let picked = Selected {
            unique_id: tile.unique_id,
            symbol: tile.symbol,
        };
        self.started = true;
        self.selection.push(picked);

        if self.selection.len() < 2 {
            return SelectOutcome::Revealed(picked);
        }

        self.input_locked = true;
        self.resolve()
    }

    fn resolve(&mut self) -> SelectOutcome {
        let first = self.selection[0];
        let second = self.selection[1];
        self.selection.clear();
        self.move_count += 1;

        if first.symbol != second.symbol {
            return SelectOutcome::Mismatched(PendingReveal {
                epoch: self.epoch,
                tiles: [first.unique_id, second.unique_id],
            });
        }

        // Match by symbol: the selected pair are the only tiles carrying it.
        for tile in self.tiles.iter_mut().filter(|t| t.symbol == first.symbol) {
            tile.is_matched = true;
            tile.is_flipped = true;
        }
        self.matches_found += 1;

        let won = self.is_won();
        if !won {
            self.input_locked = false;
        }
        SelectOutcome::Matched {
            symbol: first.symbol,
            won,
        }
    }

    /// Flip a mismatched pair back and reopen input.
    ///
    /// Returns false (and changes nothing) when the reveal belongs to another
    /// session.
    pub fn conceal(&mut self, pending: PendingReveal) -> bool {
        if pending.epoch != self.epoch {
            return false;
        }
        for tile in self
            .tiles
            .iter_mut()
            .filter(|t| !t.is_matched && pending.tiles.contains(&t.unique_id))
        {
            tile.is_flipped = false;
        }
        if !self.is_won() {
            self.input_locked = false;
        }
        true
    }

    /// Advance the elapsed-time counter by one second.
    ///
    /// No-op before the first selection and after the win.
    pub fn tick(&mut self) -> bool {
        if !self.started || self.is_won() {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }
}
