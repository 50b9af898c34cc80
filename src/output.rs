//! Output streaming
//!
//! Buffered newline-delimited UTF-8 output for generated candidates. The
//! writer flushes on close and again on drop, so partial output survives
//! early halts and propagated errors.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default buffer size for file writing (1MB)
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Destination for generated candidates, one per line
pub trait LineSink {
    /// Write one candidate followed by a newline
    fn accept(&mut self, line: &str) -> anyhow::Result<()>;

    /// Flush buffered output; call on every exit path
    fn close(&mut self) -> anyhow::Result<()>;
}

/// Buffered file-backed sink
pub struct StreamWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl StreamWriter {
    /// Create a writer, truncating any existing file at the path
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        Self::with_buffer_size(path, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(path: PathBuf, buffer_size: usize) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_output_dir(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl LineSink for StreamWriter {
    fn accept(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    fn close(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for StreamWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Build the default timestamped output path for a generation run
pub fn generate_output_path(mode: &str, first_name: &str, last_name: &str) -> PathBuf {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let safe_first: String = first_name.chars().filter(|c| c.is_alphanumeric()).collect();
    let safe_last: String = last_name.chars().filter(|c| c.is_alphanumeric()).collect();

    PathBuf::from("wordlists").join(format!(
        "{}_wordlist_{}_{}_{}.txt",
        mode, safe_first, safe_last, timestamp
    ))
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> anyhow::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
