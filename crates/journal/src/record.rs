use serde::Serialize;

use crate::core::GameEvent;

/// One line of the journal: a game event stamped with its position in the
/// stream and the loop clock at the time it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRecord {
    pub seq: u64,
    pub ts_ms: u64,
    #[serde(flatten)]
    pub event: GameEvent,
}

impl JournalRecord {
    pub fn new(seq: u64, ts_ms: u64, event: GameEvent) -> Self {
        Self { seq, ts_ms, event }
    }

    /// Serialize as one JSONL line (including the trailing newline) into `buf`.
    pub fn encode_line(&self, buf: &mut Vec<u8>) -> serde_json::Result<()> {
        encode_json_line(self, buf)
    }
}

/// Append `value` to `buf` as one JSON line.
///
/// On error `buf` is truncated back to its previous length, so lines already
/// batched in it stay intact.
pub fn encode_json_line<T: Serialize + ?Sized>(value: &T, buf: &mut Vec<u8>) -> serde_json::Result<()> {
    let start = buf.len();
    if let Err(e) = serde_json::to_writer(&mut *buf, value) {
        buf.truncate(start);
        return Err(e);
    }
    buf.push(b'\n');
    Ok(())
}
