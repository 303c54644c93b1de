use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::record::JournalRecord;

/// Append records from `rx` to `path` until every sender is dropped.
///
/// Returns the number of lines written. A record that fails to serialize is
/// skipped; a write error ends the task.
pub async fn write_records(
    path: &Path,
    mut rx: mpsc::UnboundedReceiver<JournalRecord>,
) -> std::io::Result<u64> {
    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    let mut buf: Vec<u8> = Vec::with_capacity(4096);
    let mut written = 0;

    while let Some(record) = rx.recv().await {
        buf.clear();
        if record.encode_line(&mut buf).is_err() {
            continue;
        }
        // Batch whatever is already queued into the same write. A failed
        // encode leaves `buf` as it was.
        while let Ok(next) = rx.try_recv() {
            if next.encode_line(&mut buf).is_ok() {
                written += 1;
            }
        }
        file.write_all(&buf).await?;
        written += 1;
    }

    file.flush().await?;
    Ok(written)
}
