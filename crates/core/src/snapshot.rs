use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::types::{Phase, Tile};

/// Read-only view of the live session, handed to renderers and observers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub tiles: Vec<Tile>,
    pub move_count: u32,
    pub elapsed_seconds: u32,
    pub matches_found: u32,
    pub total_pairs: u32,
    pub input_locked: bool,
    pub is_won: bool,
    pub started: bool,
    pub phase: Phase,
    pub can_reset: bool,
    pub epoch: u64,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.move_count = 0;
        self.elapsed_seconds = 0;
        self.matches_found = 0;
        self.total_pairs = 0;
        self.input_locked = false;
        self.is_won = false;
        self.started = false;
        self.phase = Phase::NotStarted;
        self.can_reset = true;
        self.epoch = 0;
        self.seed = 0;
    }

    /// Stable 64-bit fingerprint of everything a renderer would show.
    ///
    /// Uses FNV-1a rather than `DefaultHasher`, whose output is not
    /// guaranteed stable across Rust versions.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1aHasher::new();
        self.hash(&mut h);
        h.finish()
    }

    /// True when the screen can only change in response to input.
    pub fn is_static(&self) -> bool {
        !self.started || self.is_won
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            move_count: 0,
            elapsed_seconds: 0,
            matches_found: 0,
            total_pairs: 0,
            input_locked: false,
            is_won: false,
            started: false,
            phase: Phase::NotStarted,
            can_reset: true,
            epoch: 0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}
