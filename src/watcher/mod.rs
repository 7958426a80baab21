//! Log-tailing and event-extraction engine.
//!
//! Follows the growing (and occasionally recreated) MTGA `Player.log`,
//! reassembles JSON payloads split across lines, and publishes normalized
//! draft events.

mod classifier;
mod controller;
mod cursor;
mod error;
mod events;
mod lines;
mod normalize;
mod payload;
mod tail;

pub use classifier::{EventClassifier, MarkerKind, RawEvent};
pub use controller::LogWatcher;
pub use cursor::{FileCursor, ReadPlan};
pub use error::{LineError, WatcherError};
pub use events::{DeckSnapshotEvent, DraftEvent, DraftPackEvent, DraftPickEvent};
pub use lines::LineReassembler;
pub use tail::LogTail;
