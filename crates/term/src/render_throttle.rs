use crate::core::GameSnapshot;

/// Skips redraws of a frame that cannot have changed.
///
/// The clock only moves once per second, so most frames of a running game are
/// identical to the previous one. A changed fingerprint (or cursor position)
/// always renders; an unchanged one renders at most once per interval.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_key: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_key: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render `snap` with the cursor at `cursor`.
    pub fn should_render(&mut self, now_ms: u64, snap: &GameSnapshot, cursor: usize) -> bool {
        let key = snap.fingerprint() ^ (cursor as u64).rotate_left(32);
        self.should_render_key(now_ms, key)
    }

    /// Same decision for a precomputed frame key.
    pub fn should_render_key(&mut self, now_ms: u64, key: u64) -> bool {
        if !self.has_rendered || key != self.last_key {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_key = key;
            return true;
        }

        if now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms {
            self.last_render_ms = now_ms;
            return true;
        }

        false
    }

    /// Force the next call to render.
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }
}
