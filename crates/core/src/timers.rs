//! Timer queue driven by the game loop clock.
//!
//! Nothing here sleeps. The loop reports elapsed milliseconds through
//! [`Timers::advance`] and then drains due entries with [`Timers::pop_due`].
//! Every entry carries the epoch of the session that scheduled it, so the
//! consumer can drop entries that outlived their session.

use crate::types::TileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Flip a mismatched pair back face down.
    Conceal([TileId; 2]),
    /// One second of play time.
    ClockTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timer {
    pub epoch: u64,
    pub due_ms: u64,
    pub kind: TimerKind,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: u64,
    next_seq: u64,
    queue: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current loop clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Schedule `kind` to fire `delay_ms` from now.
    pub fn schedule(&mut self, epoch: u64, delay_ms: u32, kind: TimerKind) {
        self.schedule_at(epoch, self.now_ms + u64::from(delay_ms), kind);
    }

    /// Schedule `kind` at an absolute clock value.
    ///
    /// Repeating timers re-arm from their previous due time so they do not
    /// drift when a frame runs late.
    pub fn schedule_at(&mut self, epoch: u64, due_ms: u64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.queue.push(Timer {
            epoch,
            due_ms,
            kind,
            seq,
        });
    }

    /// Drop every pending entry of the given kind.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.queue.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.now_ms += u64::from(elapsed_ms);
    }

    /// Remove and return the earliest entry that is due.
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self) -> Option<Timer> {
        let now = self.now_ms;
        let (index, _) = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))?;
        Some(self.queue.swap_remove(index))
    }

    /// Milliseconds until the next entry is due, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.queue
            .iter()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
            .min()
    }
}
