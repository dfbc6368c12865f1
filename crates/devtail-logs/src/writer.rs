//! Append-only log file handles

use devtail_core::Result;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// An append-only log file.
///
/// Every write goes down as a single `write_all` on a file opened in append
/// mode, so concurrent writers sharing one file interleave at line
/// granularity and never corrupt a partial line.
pub struct LogFile {
    path: PathBuf,
    file: File,
}

impl LogFile {
    /// Open (creating if missing, never truncating) a log file for appending.
    pub fn append(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    /// Append one line, adding the trailing newline.
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        (&self.file).write_all(buf.as_bytes())?;
        Ok(())
    }

    /// Append a pre-formatted block (already newline-terminated) as one unit.
    pub fn write_block(&self, block: &str) -> Result<()> {
        (&self.file).write_all(block.as_bytes())?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
