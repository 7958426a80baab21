//! Incremental log tail: the per-tick pipeline.
//!
//! Owns the full watch state (cursor offset, carry buffer, pending
//! classifier header) and runs one bounded read through classification,
//! extraction, and normalization. All state is mutated only inside
//! [`LogTail::poll`], so ticks are serial by construction.

use std::io::SeekFrom;
use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::classifier::EventClassifier;
use super::cursor::{FileCursor, ReadPlan};
use super::error::WatcherError;
use super::events::DraftEvent;
use super::lines::LineReassembler;
use super::{normalize, payload};

/// Incremental reader that turns appended log bytes into domain events.
#[derive(Debug)]
pub struct LogTail {
    path: PathBuf,
    cursor: FileCursor,
    lines: LineReassembler,
    classifier: EventClassifier,
}

impl LogTail {
    /// Create a tail starting at byte `offset` of `path`.
    #[must_use]
    pub fn new(path: PathBuf, offset: u64) -> Self {
        Self {
            path,
            cursor: FileCursor::new(offset),
            lines: LineReassembler::new(),
            classifier: EventClassifier::new(),
        }
    }

    /// Current byte offset.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.cursor.offset()
    }

    /// Path being tailed.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Run one poll: read the appended range and extract its events.
    ///
    /// If the file shrank since the last poll (the game restarted and the
    /// log was recreated), all state is reset and the new content is read
    /// from the start. Per-line failures are logged and dropped; they
    /// never surface here.
    ///
    /// # Errors
    ///
    /// `Stat` / `Read` on I/O failure. Both are transient: the offset is
    /// left untouched and the same range is retried on the next poll.
    pub async fn poll(&mut self) -> Result<Vec<DraftEvent>, WatcherError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(WatcherError::Stat)?;
        let file_len = metadata.len();

        let (start, end) = match self.cursor.plan(file_len) {
            ReadPlan::UpToDate => return Ok(Vec::new()),
            ReadPlan::Range { start, end } => (start, end),
            ReadPlan::Truncated => {
                tracing::warn!(
                    path = %self.path.display(),
                    old_offset = self.cursor.offset(),
                    new_len = file_len,
                    "Log file shrank, assuming restart; resetting watch state"
                );
                self.cursor.reset();
                self.lines.reset();
                self.classifier.reset();
                (0, file_len)
            }
        };

        let chunk = self.read_range(start, end).await?;
        self.cursor.advance_to(end);

        let mut events = Vec::new();
        for line in self.lines.push(&chunk) {
            self.process_line(&line, &mut events);
        }
        Ok(events)
    }

    /// Read exactly the byte range `[start, end)` as lossy UTF-8.
    async fn read_range(&self, start: u64, end: u64) -> Result<String, WatcherError> {
        let mut file = File::open(&self.path).await.map_err(WatcherError::Read)?;
        file.seek(SeekFrom::Start(start))
            .await
            .map_err(WatcherError::Read)?;

        let mut buf = Vec::with_capacity((end - start) as usize);
        file.take(end - start)
            .read_to_end(&mut buf)
            .await
            .map_err(WatcherError::Read)?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Classify, extract, and normalize a single complete line.
    fn process_line(&mut self, line: &str, events: &mut Vec<DraftEvent>) {
        for raw in self.classifier.classify(line) {
            let value = match payload::extract(&raw.line) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!(kind = ?raw.kind, error = %err, "Dropping line");
                    continue;
                }
            };
            match normalize::normalize(raw.kind, value) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(kind = ?raw.kind, error = %err, "Dropping message");
                }
            }
        }
    }
}
