//! Normalized domain events published to subscribers.

use serde::Serialize;

/// A new set of card choices appeared in the draft.
#[derive(Debug, Clone, Serialize)]
pub struct DraftPackEvent {
    /// Card ids in pack order, as they appear in the log. Never empty.
    pub card_ids: Vec<String>,
    /// The full merged log message, with the normalized list written back
    /// under `DraftPack` so consumers see one canonical shape.
    pub raw: serde_json::Value,
}

/// The player (or a bot) picked a card from a pack.
///
/// Emitted once per occurrence in the log stream; de-duplicating a
/// repeated (draft, pack, pick) triple is the consumer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftPickEvent {
    pub draft_id: String,
    pub pack_number: u32,
    pub pick_number: u32,
    pub card_id: u32,
}

/// Main and sideboard contents of the most recently active limited deck.
///
/// Lists are flat: a card with quantity 3 appears three times in a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckSnapshotEvent {
    pub event_id: String,
    pub main: Vec<u32>,
    pub side: Vec<u32>,
}

/// Events emitted by the log watcher.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DraftEvent {
    /// A pack is on offer.
    Pack(DraftPackEvent),
    /// A pick was made.
    Pick(DraftPickEvent),
    /// A deck snapshot was recovered from the log.
    Deck(DeckSnapshotEvent),
}
