//! Byte-offset cursor over the watched log file.
//!
//! Pure bookkeeping: given the file's current size, decides what (if
//! anything) needs to be read. The I/O itself lives in [`super::tail`].

/// What a poll tick should do with the file, given its current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPlan {
    /// File has not grown since the last read.
    UpToDate,
    /// Read the half-open byte range `[start, end)`.
    Range { start: u64, end: u64 },
    /// File shrank below our offset; it was recreated or rotated.
    /// Caller must reset the cursor and clear dependent buffers.
    Truncated,
}

/// Tracks how far into the file we have read.
#[derive(Debug, Default)]
pub struct FileCursor {
    offset: u64,
}

impl FileCursor {
    /// Create a cursor positioned at `offset`.
    #[must_use]
    pub fn new(offset: u64) -> Self {
        Self { offset }
    }

    /// Current byte offset.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Plan the next read against the file's observed size.
    #[must_use]
    pub fn plan(&self, current_len: u64) -> ReadPlan {
        if current_len == self.offset {
            ReadPlan::UpToDate
        } else if current_len < self.offset {
            ReadPlan::Truncated
        } else {
            ReadPlan::Range {
                start: self.offset,
                end: current_len,
            }
        }
    }

    /// Advance to `offset` after a completed read.
    pub fn advance_to(&mut self, offset: u64) {
        self.offset = offset;
    }

    /// Reset to the beginning of the file (after truncation/rotation).
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
