//! Watcher lifecycle and polling loop.
//!
//! Owns the start/stop state machine and the spawned polling task. The
//! task is the sole owner of the [`LogTail`] state, so no locking is
//! needed; `stop()` cancels future ticks and lets an in-flight tick
//! finish.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{StartMode, WatcherConfig};

use super::error::WatcherError;
use super::events::DraftEvent;
use super::tail::LogTail;

/// Watches the MTGA log and publishes [`DraftEvent`]s to a channel.
///
/// Independently instantiable: path and poll interval are injected via
/// [`WatcherConfig`], so multiple watchers (and parallel tests) can run
/// against different files.
#[derive(Debug)]
pub struct LogWatcher {
    config: WatcherConfig,
    running: Option<RunningTask>,
}

#[derive(Debug)]
struct RunningTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl LogWatcher {
    /// Create a stopped watcher for the given config.
    #[must_use]
    pub fn new(config: WatcherConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    /// Whether the polling task is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start polling; returns the subscriber end of the event channel.
    ///
    /// The initial offset is the file's current size for
    /// [`StartMode::SkipHistory`] (live events only) or zero for
    /// [`StartMode::ReplayHistory`] (re-emit everything already logged).
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the log file does not exist (the watcher stays
    /// stopped); `AlreadyRunning` if called twice without `stop()`.
    pub fn start(&mut self) -> Result<mpsc::UnboundedReceiver<DraftEvent>, WatcherError> {
        if self.running.is_some() {
            return Err(WatcherError::AlreadyRunning);
        }

        let metadata = std::fs::metadata(&self.config.log_path)
            .map_err(|_| WatcherError::FileNotFound(self.config.log_path.clone()))?;

        let initial_offset = match self.config.start_mode {
            StartMode::SkipHistory => metadata.len(),
            StartMode::ReplayHistory => 0,
        };

        tracing::info!(
            path = %self.config.log_path.display(),
            initial_offset,
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "Starting log watcher"
        );

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(
            LogTail::new(self.config.log_path.clone(), initial_offset),
            self.config.poll_interval,
            event_tx,
            cancel.clone(),
        ));

        self.running = Some(RunningTask { cancel, handle });
        Ok(event_rx)
    }

    /// Stop polling. Idempotent: stopping a stopped watcher is a no-op.
    ///
    /// Waits for the in-flight tick (if any) to finish; no events are
    /// published after this returns.
    pub async fn stop(&mut self) {
        let Some(task) = self.running.take() else {
            return;
        };
        tracing::info!(path = %self.config.log_path.display(), "Stopping log watcher");
        task.cancel.cancel();
        let _ = task.handle.await;
    }
}

/// The spawned polling task: one serial tick per interval.
async fn poll_loop(
    mut tail: LogTail,
    interval: std::time::Duration,
    event_tx: mpsc::UnboundedSender<DraftEvent>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        match tail.poll().await {
            Ok(events) => {
                for event in events {
                    if event_tx.send(event).is_err() {
                        tracing::debug!("All subscribers dropped, stopping poll loop");
                        return;
                    }
                }
            }
            Err(err) => {
                // Transient: the game may be mid-restart. Retry next tick.
                tracing::warn!(
                    path = %tail.path().display(),
                    error = %err,
                    "Poll failed, will retry"
                );
            }
        }
    }
}
