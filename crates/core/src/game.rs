//! Game controller - owns the live session and its timers
//!
//! [`Game`] is the single place where input is interpreted. It keeps exactly
//! one [`Session`], swaps it for a fresh deal on reset, and turns elapsed
//! loop time into mismatch reveals and clock ticks.
//!
//! Every deal gets a new epoch. Timers carry the epoch they were scheduled
//! under, and a timer whose epoch no longer matches the live session is
//! dropped when it fires. Reset also clears the queue, but the epoch check is
//! what guarantees a previous deal can never touch the current board.

use std::collections::VecDeque;

use serde::Serialize;

use crate::config::GameConfig;
use crate::deck::Palette;
use crate::rng::DeckRng;
use crate::session::{IgnoreReason, PendingReveal, SelectOutcome, Session};
use crate::snapshot::GameSnapshot;
use crate::timers::{TimerKind, Timers};
use crate::types::{GameAction, Symbol, Tile, TileId, CLOCK_TICK_MS, MISMATCH_REVEAL_MS};

/// Most events kept between drains. Older events are dropped first.
pub const EVENT_BACKLOG: usize = 1024;

/// Transition record, drained by observers such as the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    #[serde(rename_all = "camelCase")]
    Dealt { epoch: u64, seed: u64, tiles: u32 },
    #[serde(rename_all = "camelCase")]
    Selected { epoch: u64, tile: TileId, symbol: Symbol },
    #[serde(rename_all = "camelCase")]
    Ignored { epoch: u64, tile: TileId, reason: IgnoreReason },
    #[serde(rename_all = "camelCase")]
    Matched { epoch: u64, symbol: Symbol, moves: u32, matches: u32 },
    #[serde(rename_all = "camelCase")]
    Mismatched { epoch: u64, tiles: [TileId; 2], moves: u32 },
    #[serde(rename_all = "camelCase")]
    Concealed { epoch: u64, tiles: [TileId; 2] },
    #[serde(rename_all = "camelCase")]
    Won { epoch: u64, moves: u32, elapsed_seconds: u32 },
    #[serde(rename_all = "camelCase")]
    Reset { previous_epoch: u64, epoch: u64 },
    /// A timer outlived its session and was discarded.
    #[serde(rename_all = "camelCase")]
    StaleTimer { epoch: u64, current_epoch: u64 },
}

impl GameEvent {
    pub fn epoch(&self) -> u64 {
        match *self {
            GameEvent::Dealt { epoch, .. }
            | GameEvent::Selected { epoch, .. }
            | GameEvent::Ignored { epoch, .. }
            | GameEvent::Matched { epoch, .. }
            | GameEvent::Mismatched { epoch, .. }
            | GameEvent::Concealed { epoch, .. }
            | GameEvent::Won { epoch, .. }
            | GameEvent::Reset { epoch, .. }
            | GameEvent::StaleTimer { epoch, .. } => epoch,
        }
    }
}

/// Controller owning the live session.
#[derive(Debug, Clone)]
pub struct Game {
    palette: Palette,
    seeds: DeckRng,
    epoch: u64,
    session: Session,
    timers: Timers,
    events: VecDeque<GameEvent>,
}

impl Game {
    /// Create a controller and deal the first session.
    pub fn new(config: &GameConfig) -> Self {
        let mut seeds = DeckRng::new(config.seed);
        let session = Session::deal(&config.palette, seeds.next_seed(), 0);
        Self::with_session(config.palette.clone(), seeds, session)
    }

    /// Create a controller whose first session uses the given board layout.
    ///
    /// Later resets deal shuffled decks from `config` as usual.
    pub fn with_deck(config: &GameConfig, tiles: Vec<Tile>) -> Self {
        let seeds = DeckRng::new(config.seed);
        let session = Session::from_tiles(tiles, 0);
        Self::with_session(config.palette.clone(), seeds, session)
    }

    fn with_session(palette: Palette, seeds: DeckRng, session: Session) -> Self {
        let dealt = GameEvent::Dealt {
            epoch: session.epoch(),
            seed: session.seed(),
            tiles: session.tiles().len() as u32,
        };
        let mut game = Self {
            palette,
            seeds,
            epoch: session.epoch(),
            session,
            timers: Timers::new(),
            events: VecDeque::new(),
        };
        game.record(dealt);
        game
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Pending timers (reveals and the running clock).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Milliseconds until the next timer fires, if any is pending.
    pub fn next_timer_in(&self) -> Option<u64> {
        self.timers.next_due_in()
    }

    /// Whether a front end should offer reset right now.
    ///
    /// Reset itself is always honoured; this only mirrors the policy of
    /// disabling the control while a mismatched pair is on display.
    pub fn can_reset(&self) -> bool {
        !self.session.input_locked() || self.session.is_won()
    }

    /// Select a tile by identifier.
    pub fn select_tile(&mut self, id: TileId) -> SelectOutcome {
        let was_started = self.session.started();
        let outcome = self.session.select(id);
        let epoch = self.epoch;

        if let SelectOutcome::Ignored(reason) = outcome {
            self.record(GameEvent::Ignored {
                epoch,
                tile: id,
                reason,
            });
            return outcome;
        }

        if let Some(tile) = self.session.tile(id) {
            self.record(GameEvent::Selected {
                epoch,
                tile: id,
                symbol: tile.symbol,
            });
        }

        if !was_started && self.session.started() {
            self.timers.schedule(epoch, CLOCK_TICK_MS, TimerKind::ClockTick);
        }

        match outcome {
            SelectOutcome::Matched { symbol, won } => {
                self.record(GameEvent::Matched {
                    epoch,
                    symbol,
                    moves: self.session.move_count(),
                    matches: self.session.matches_found(),
                });
                if won {
                    self.timers.cancel(TimerKind::ClockTick);
                    self.record(GameEvent::Won {
                        epoch,
                        moves: self.session.move_count(),
                        elapsed_seconds: self.session.elapsed_seconds(),
                    });
                }
            }
            SelectOutcome::Mismatched(pending) => {
                self.timers
                    .schedule(pending.epoch, MISMATCH_REVEAL_MS, TimerKind::Conceal(pending.tiles));
                self.record(GameEvent::Mismatched {
                    epoch,
                    tiles: pending.tiles,
                    moves: self.session.move_count(),
                });
            }
            SelectOutcome::Revealed(_) | SelectOutcome::Ignored(_) => {}
        }

        outcome
    }

    /// Discard the current session and deal a new one.
    pub fn request_reset(&mut self) {
        let previous_epoch = self.epoch;
        self.epoch = self.epoch.wrapping_add(1);
        self.timers.cancel_all();

        let seed = self.seeds.next_seed();
        self.session = Session::deal(&self.palette, seed, self.epoch);

        self.record(GameEvent::Reset {
            previous_epoch,
            epoch: self.epoch,
        });
        self.record(GameEvent::Dealt {
            epoch: self.epoch,
            seed,
            tiles: self.session.tiles().len() as u32,
        });
    }

    /// Apply a game action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Select(id) => self.select_tile(id).accepted(),
            GameAction::Reset => {
                self.request_reset();
                true
            }
        }
    }

    /// Advance the controller clock and fire every timer that became due.
    ///
    /// Returns true if any timer changed the session.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.timers.advance(elapsed_ms);
        let mut changed = false;

        while let Some(timer) = self.timers.pop_due() {
            if timer.epoch != self.epoch {
                self.record(GameEvent::StaleTimer {
                    epoch: timer.epoch,
                    current_epoch: self.epoch,
                });
                continue;
            }

            match timer.kind {
                TimerKind::Conceal(tiles) => {
                    let pending = PendingReveal {
                        epoch: timer.epoch,
                        tiles,
                    };
                    if self.session.conceal(pending) {
                        self.record(GameEvent::Concealed {
                            epoch: timer.epoch,
                            tiles,
                        });
                        changed = true;
                    }
                }
                TimerKind::ClockTick => {
                    if self.session.tick() {
                        changed = true;
                        self.timers.schedule_at(
                            timer.epoch,
                            timer.due_ms + u64::from(CLOCK_TICK_MS),
                            TimerKind::ClockTick,
                        );
                    }
                }
            }
        }

        changed
    }

    /// Take the transitions recorded since the last call.
    ///
    /// Callers that never drain keep only the newest [`EVENT_BACKLOG`] events.
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn record(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_BACKLOG {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let s = &self.session;
        out.tiles.clear();
        out.tiles.extend_from_slice(s.tiles());
        out.move_count = s.move_count();
        out.elapsed_seconds = s.elapsed_seconds();
        out.matches_found = s.matches_found();
        out.total_pairs = s.total_pairs();
        out.input_locked = s.input_locked();
        out.is_won = s.is_won();
        out.started = s.started();
        out.phase = s.phase();
        out.can_reset = self.can_reset();
        out.epoch = s.epoch();
        out.seed = s.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(&GameConfig::default().with_seed(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    fn config() -> GameConfig {
        GameConfig::default().with_seed(12345)
    }

    fn abab_game() -> Game {
        let tiles = ['A', 'B', 'A', 'B']
            .iter()
            .enumerate()
            .map(|(i, &c)| Tile::new(TileId(i as u32), Symbol::new(c)))
            .collect();
        Game::with_deck(&config(), tiles)
    }

    /// Find two ids with different symbols on a dealt board.
    fn mismatched_pair(game: &Game) -> (TileId, TileId) {
        let tiles = game.session().tiles();
        let first = tiles[0];
        let other = tiles
            .iter()
            .find(|t| t.symbol != first.symbol)
            .unwrap();
        (first.unique_id, other.unique_id)
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(&config());
        let snap = game.snapshot();
        assert_eq!(snap.tiles.len(), 16);
        assert_eq!(snap.total_pairs, 8);
        assert_eq!(snap.phase, Phase::NotStarted);
        assert!(snap.can_reset);
        assert_eq!(game.epoch(), 0);
        assert_eq!(game.pending_timers(), 0);
    }

    #[test]
    fn test_same_seed_same_deals() {
        let mut a = Game::new(&config());
        let mut b = Game::new(&config());
        assert_eq!(a.session().tiles(), b.session().tiles());
        a.request_reset();
        b.request_reset();
        assert_eq!(a.session().tiles(), b.session().tiles());
    }

    #[test]
    fn test_reset_increments_epoch() {
        let mut game = Game::new(&config());
        assert!(game.apply_action(GameAction::Reset));
        assert_eq!(game.epoch(), 1);
        assert_eq!(game.session().epoch(), 1);
    }

    #[test]
    fn test_mismatch_conceals_after_delay() {
        let mut game = abab_game();
        game.select_tile(TileId(0));
        game.select_tile(TileId(1));
        assert!(game.session().input_locked());
        assert!(!game.can_reset());

        game.advance(MISMATCH_REVEAL_MS - 1);
        assert!(game.session().input_locked());
        assert!(game.session().tile(TileId(0)).unwrap().is_flipped);

        game.advance(1);
        assert!(!game.session().input_locked());
        assert!(!game.session().tile(TileId(0)).unwrap().is_flipped);
        assert!(!game.session().tile(TileId(1)).unwrap().is_flipped);
        assert!(game.can_reset());
    }

    #[test]
    fn test_clock_starts_on_first_selection() {
        let mut game = abab_game();
        game.advance(5000);
        assert_eq!(game.session().elapsed_seconds(), 0);

        game.select_tile(TileId(0));
        game.advance(999);
        assert_eq!(game.session().elapsed_seconds(), 0);
        game.advance(1);
        assert_eq!(game.session().elapsed_seconds(), 1);

        // A long frame catches up without drift.
        game.advance(2500);
        assert_eq!(game.session().elapsed_seconds(), 3);
        game.advance(500);
        assert_eq!(game.session().elapsed_seconds(), 4);
    }

    #[test]
    fn test_clock_stops_on_win() {
        let mut game = abab_game();
        game.select_tile(TileId(0));
        game.select_tile(TileId(2));
        game.advance(1000);
        game.select_tile(TileId(1));
        game.select_tile(TileId(3));
        assert!(game.session().is_won());
        assert_eq!(game.pending_timers(), 0);

        game.advance(10_000);
        assert_eq!(game.session().elapsed_seconds(), 1);
    }

    #[test]
    fn test_reset_cancels_pending_reveal() {
        let mut game = Game::new(&config());
        let (a, b) = mismatched_pair(&game);
        game.select_tile(a);
        game.select_tile(b);
        assert_eq!(game.pending_timers(), 2);

        game.request_reset();
        assert_eq!(game.pending_timers(), 0);
        let snap = game.snapshot();
        assert_eq!(snap.move_count, 0);
        assert_eq!(snap.matches_found, 0);
        assert_eq!(snap.elapsed_seconds, 0);
        assert!(!snap.started);
        assert!(!snap.input_locked);
    }

    #[test]
    fn test_stale_timer_is_dropped() {
        let mut game = Game::new(&config());
        let (a, b) = mismatched_pair(&game);
        game.select_tile(a);
        game.select_tile(b);
        game.request_reset();

        // Simulate a timer that escaped cancellation.
        game.timers
            .schedule(0, MISMATCH_REVEAL_MS, TimerKind::Conceal([a, b]));
        game.select_tile(a);
        let before = game.snapshot();

        game.advance(MISMATCH_REVEAL_MS);
        let after = game.snapshot();
        assert_eq!(before.tiles, after.tiles);
        assert!(game.session().tile(a).unwrap().is_flipped);
        assert!(game
            .drain_events()
            .any(|e| matches!(e, GameEvent::StaleTimer { epoch: 0, current_epoch: 1 })));
    }

    #[test]
    fn test_events_are_recorded_and_drained() {
        let mut game = abab_game();
        game.select_tile(TileId(0));
        game.select_tile(TileId(1));
        game.select_tile(TileId(2));
        game.advance(MISMATCH_REVEAL_MS);

        let events: Vec<GameEvent> = game.drain_events().collect();
        assert!(matches!(events[0], GameEvent::Dealt { epoch: 0, .. }));
        assert!(matches!(events[1], GameEvent::Selected { tile: TileId(0), .. }));
        assert!(matches!(events[2], GameEvent::Selected { tile: TileId(1), .. }));
        assert!(matches!(events[3], GameEvent::Mismatched { moves: 1, .. }));
        assert!(matches!(
            events[4],
            GameEvent::Ignored {
                reason: IgnoreReason::Locked,
                ..
            }
        ));
        assert!(matches!(events[5], GameEvent::Concealed { .. }));
        assert_eq!(game.drain_events().count(), 0);
    }

    #[test]
    fn test_undrained_events_keep_the_newest_backlog() {
        let mut game = abab_game();
        for _ in 0..2 * EVENT_BACKLOG {
            game.select_tile(TileId(99));
        }
        game.select_tile(TileId(0));

        let events: Vec<GameEvent> = game.drain_events().collect();
        assert_eq!(events.len(), EVENT_BACKLOG);
        assert!(events[..EVENT_BACKLOG - 1].iter().all(|e| matches!(
            e,
            GameEvent::Ignored {
                reason: IgnoreReason::UnknownTile,
                ..
            }
        )));
        assert!(matches!(
            events[EVENT_BACKLOG - 1],
            GameEvent::Selected { tile: TileId(0), .. }
        ));
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut game = abab_game();
        game.select_tile(TileId(0));
        game.select_tile(TileId(2));
        let snap = game.snapshot();
        assert_eq!(snap.matches_found, 1);
        assert_eq!(snap.move_count, 1);
        assert!(snap.tiles[0].is_matched);
        assert!(snap.tiles[2].is_matched);
        assert_eq!(snap.phase, Phase::AwaitingSecondPick);
    }
}
