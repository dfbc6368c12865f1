//! Batch ingestion: parse, filter, format, append

use devtail_core::{LogEntry, Result};
use devtail_logs::{format_log_line, ExcludeFilter, LogFile};
use std::path::Path;
use tracing::debug;

/// Ingest one raw batch into the session's primary log file.
///
/// Malformed payloads are an accepted no-op (at-most-once delivery: the
/// producer cannot observe failure or usefully retry a beacon-style send).
/// Surviving entries are formatted and appended in batch order as a single
/// write, so a concurrent writer never sees a partially interleaved batch.
/// Returns the number of entries appended.
pub fn ingest(body: &[u8], log_path: &Path, excludes: &[String]) -> Result<usize> {
    let entries: Vec<LogEntry> = match serde_json::from_slice(body) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Ignoring malformed batch: {}", e);
            return Ok(0);
        }
    };

    let filter = ExcludeFilter::new(excludes);
    let mut block = String::new();
    let mut written = 0;
    for entry in &entries {
        if !filter.is_empty() && filter.matches(&entry.args.join(" ")) {
            continue;
        }
        block.push_str(&format_log_line(entry));
        written += 1;
    }

    if written > 0 {
        LogFile::append(log_path.to_path_buf())?.write_block(&block)?;
    }
    Ok(written)
}
