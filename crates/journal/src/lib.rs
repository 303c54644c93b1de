//! Journal module - structured JSONL log of game transitions
//!
//! The game loop hands every drained [`GameEvent`](crate::core::GameEvent) to
//! a [`Journal`]. Records travel over an unbounded channel to a writer task
//! running on a private tokio runtime, so the loop never waits on disk.
//!
//! # Environment Variables
//!
//! - `MEMORY_LOG_PATH`: file to append to. Unset or empty disables the journal.
//!
//! # Record Format
//!
//! One JSON object per line. `seq` counts records from zero, `tsMs` is the
//! loop clock, and the remaining fields are the event itself:
//!
//! ```text
//! {"seq":0,"tsMs":0,"type":"dealt","epoch":0,"seed":1234,"tiles":16}
//! {"seq":1,"tsMs":812,"type":"selected","epoch":0,"tile":5,"symbol":"★"}
//! {"seq":2,"tsMs":1410,"type":"selected","epoch":0,"tile":9,"symbol":"◆"}
//! {"seq":3,"tsMs":1410,"type":"mismatched","epoch":0,"tiles":[5,9],"moves":1}
//! {"seq":4,"tsMs":2416,"type":"concealed","epoch":0,"tiles":[5,9]}
//! ```

pub mod config;
pub mod record;
pub mod writer;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use config::JournalConfig;
pub use record::{encode_json_line, JournalRecord};
pub use writer::write_records;

use crate::core::GameEvent;

/// Running journal instance.
pub struct Journal {
    rt: Runtime,
    tx: mpsc::UnboundedSender<JournalRecord>,
    task: JoinHandle<std::io::Result<u64>>,
    next_seq: u64,
}

impl Journal {
    /// Start the journal from environment variables.
    ///
    /// Returns `Ok(None)` if `MEMORY_LOG_PATH` is not set.
    pub fn start_from_env() -> Result<Option<Self>> {
        Self::start(&JournalConfig::from_env())
    }

    pub fn start(config: &JournalConfig) -> Result<Option<Self>> {
        let Some(path) = config.log_path.clone() else {
            return Ok(None);
        };

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("memory-journal")
            .enable_all()
            .build()
            .context("failed to create journal runtime")?;

        // Open eagerly so a bad path is reported before the game starts.
        rt.block_on(
            tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path),
        )
        .with_context(|| format!("failed to open journal {}", path.display()))?;

        let (tx, rx) = mpsc::unbounded_channel::<JournalRecord>();
        let task = rt.spawn(async move { write_records(&path, rx).await });

        Ok(Some(Self {
            rt,
            tx,
            task,
            next_seq: 0,
        }))
    }

    /// Queue one event. Never blocks.
    pub fn record(&mut self, ts_ms: u64, event: GameEvent) {
        let record = JournalRecord::new(self.next_seq, ts_ms, event);
        self.next_seq += 1;
        let _ = self.tx.send(record);
    }

    pub fn record_all(&mut self, ts_ms: u64, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.record(ts_ms, event);
        }
    }

    /// Number of records queued so far.
    pub fn recorded(&self) -> u64 {
        self.next_seq
    }

    /// Close the channel and wait for the writer to drain it.
    ///
    /// Returns the number of lines written.
    pub fn shutdown(self) -> Result<u64> {
        let Self { rt, tx, task, .. } = self;
        drop(tx);
        let written = rt
            .block_on(task)
            .context("journal writer panicked")?
            .context("failed to write journal")?;
        Ok(written)
    }
}
