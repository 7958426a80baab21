//! Logical-line reassembly across poll cycles.
//!
//! The log is read in arbitrary chunks; a chunk routinely ends mid-line
//! and the remainder arrives on the next poll. The reassembler keeps that
//! trailing fragment in a carry buffer and only surfaces lines once their
//! terminating newline has been observed.

/// Buffers partial reads and yields complete, newline-delimited lines.
#[derive(Debug, Default)]
pub struct LineReassembler {
    carry: String,
}

impl LineReassembler {
    /// Create an empty reassembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of newly read text; returns the complete lines it
    /// closed out.
    ///
    /// The trailing fragment after the last `\n` (possibly the whole
    /// chunk) is retained for the next call, never dropped and never
    /// surfaced early. Whitespace-only lines are filtered out; a trailing
    /// `\r` is stripped so CRLF logs behave like LF ones.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.carry.push_str(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.carry.find('\n') {
            let mut line: String = self.carry.drain(..=pos).collect();
            line.pop(); // the '\n'
            if line.ends_with('\r') {
                line.pop();
            }
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        lines
    }

    /// Drop any buffered fragment (after a file truncation/rotation).
    pub fn reset(&mut self) {
        self.carry.clear();
    }

    /// The currently buffered, unterminated fragment.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.carry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lines_in_one_chunk() {
        let mut reassembler = LineReassembler::new();
        let lines = reassembler.push("one\ntwo\n");
        assert_eq!(lines, vec!["one", "two"]);
        assert_eq!(reassembler.pending(), "");
    }

    #[test]
    fn test_split_fragment_joins_next_chunk() {
        let mut reassembler = LineReassembler::new();
        let first = reassembler.push("abc\ndef");
        assert_eq!(first, vec!["abc"]);
        assert_eq!(reassembler.pending(), "def");

        let second = reassembler.push("ghi\n");
        assert_eq!(second, vec!["defghi"]);
        assert_eq!(reassembler.pending(), "");
    }

    #[test]
    fn test_chunk_without_newline_yields_nothing() {
        let mut reassembler = LineReassembler::new();
        assert!(reassembler.push("partial line").is_empty());
        assert_eq!(reassembler.pending(), "partial line");
    }

    #[test]
    fn test_empty_lines_filtered() {
        let mut reassembler = LineReassembler::new();
        let lines = reassembler.push("a\n\n   \nb\n");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_crlf_stripped() {
        let mut reassembler = LineReassembler::new();
        let lines = reassembler.push("windows line\r\nnext\r\n");
        assert_eq!(lines, vec!["windows line", "next"]);
    }

    #[test]
    fn test_reset_discards_carry() {
        let mut reassembler = LineReassembler::new();
        reassembler.push("stale tail with no newline");
        reassembler.reset();
        let lines = reassembler.push("fresh\n");
        assert_eq!(lines, vec!["fresh"]);
    }
}
