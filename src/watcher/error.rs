//! Watcher error types.

use std::path::PathBuf;

/// Errors that can occur while watching the log file.
///
/// Only `FileNotFound` (at `start()`) and `AlreadyRunning` are surfaced to
/// the caller; `Stat` and `Read` are transient, logged inside the polling
/// task, and retried on the next tick.
#[derive(thiserror::Error, Debug)]
pub enum WatcherError {
    /// Log file does not exist at start time.
    #[error("log file not found: {0}")]
    FileNotFound(PathBuf),

    /// The watcher is already running.
    #[error("watcher already running")]
    AlreadyRunning,

    /// Failed to stat the log file.
    #[error("failed to stat log file: {0}")]
    Stat(#[source] std::io::Error),

    /// Failed to read the appended byte range.
    #[error("failed to read log file: {0}")]
    Read(#[source] std::io::Error),
}

/// Per-line failures.
///
/// Never escapes a poll tick: the offending line is logged and dropped,
/// the watch loop and its state stay intact.
#[derive(thiserror::Error, Debug)]
pub enum LineError {
    /// No `{` anywhere in the line.
    #[error("no JSON object found in line")]
    NoJsonFound,

    /// The substring starting at the first `{` is not valid JSON.
    #[error("malformed JSON payload: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Parsed fine, but the shape does not match the expected message kind.
    #[error("unexpected message shape: {0}")]
    ShapeMismatch(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_display() {
        let err = WatcherError::FileNotFound(PathBuf::from("/tmp/Player.log"));
        assert_eq!(err.to_string(), "log file not found: /tmp/Player.log");
    }

    #[test]
    fn test_already_running_display() {
        let err = WatcherError::AlreadyRunning;
        assert_eq!(err.to_string(), "watcher already running");
    }

    #[test]
    fn test_stat_wraps_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = WatcherError::Stat(io_err);
        assert!(err.to_string().contains("failed to stat"));
    }

    #[test]
    fn test_no_json_found_display() {
        let err = LineError::NoJsonFound;
        assert_eq!(err.to_string(), "no JSON object found in line");
    }

    #[test]
    fn test_malformed_json_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: LineError = parse_err.into();
        assert!(matches!(err, LineError::MalformedJson(_)));
        assert!(err.to_string().contains("malformed JSON"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = LineError::ShapeMismatch("missing Courses array");
        assert_eq!(
            err.to_string(),
            "unexpected message shape: missing Courses array"
        );
    }
}
