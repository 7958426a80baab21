//! Normalization of parsed log messages into domain events.
//!
//! The log carries the same information in several shapes depending on
//! draft mode and client version: packs arrive as an explicit id array
//! (`DraftPack`, bot drafts) or a comma-separated string (`PackCards`,
//! human drafts); picks hide their payload one more level down in a
//! JSON-encoded `request` string; deck contents come back as
//! `{cardId, quantity}` pairs inside course records. This module maps all
//! of them onto the small [`DraftEvent`] surface.

use serde::Deserialize;
use serde_json::Value;

use super::classifier::MarkerKind;
use super::error::LineError;
use super::events::{DeckSnapshotEvent, DraftEvent, DraftPackEvent, DraftPickEvent};

/// Normalize one extracted message.
///
/// `Ok(None)` means the message was structurally fine but carries nothing
/// to publish (status-only pack message, pick without a card id, courses
/// response with no active limited deck); the caller moves on without
/// logging an error.
///
/// # Errors
///
/// `ShapeMismatch` / `MalformedJson` when the message does not have the
/// expected structure for its kind; the caller logs and drops the line.
pub fn normalize(kind: MarkerKind, value: Value) -> Result<Option<DraftEvent>, LineError> {
    match kind {
        MarkerKind::Pack => normalize_pack(value),
        MarkerKind::Pick => normalize_pick(&value),
        MarkerKind::Courses => normalize_courses(value),
        MarkerKind::DeckImport => normalize_deck_import(value),
    }
}

/// Pack messages: explicit array first, comma-string fallback.
fn normalize_pack(value: Value) -> Result<Option<DraftEvent>, LineError> {
    let obj = value
        .as_object()
        .ok_or(LineError::ShapeMismatch("pack message is not an object"))?;

    let card_ids: Vec<String> = if let Some(pack) = obj.get("DraftPack").and_then(Value::as_array)
    {
        pack.iter().filter_map(id_as_string).collect()
    } else if let Some(cards) = obj.get("PackCards").and_then(Value::as_str) {
        cards
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect()
    } else {
        Vec::new()
    };

    if card_ids.is_empty() {
        // Status-only messages (phase changes, pick confirmations) share
        // the pack markers but carry no card list.
        if obj.contains_key("DraftStatus") {
            tracing::debug!("Draft status message without pack contents, skipping");
        }
        return Ok(None);
    }

    let mut raw = value;
    raw["DraftPack"] = Value::Array(card_ids.iter().cloned().map(Value::String).collect());

    Ok(Some(DraftEvent::Pack(DraftPackEvent { card_ids, raw })))
}

/// The JSON-encoded `request` string inside a pick envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PickRequest {
    draft_id: String,
    #[serde(default)]
    pack: u32,
    #[serde(default)]
    pick: u32,
    #[serde(default)]
    grp_ids: Vec<u32>,
}

/// Pick messages: unwrap the `request` envelope and take the first id.
fn normalize_pick(value: &Value) -> Result<Option<DraftEvent>, LineError> {
    let request = value
        .get("request")
        .and_then(Value::as_str)
        .ok_or(LineError::ShapeMismatch("pick envelope missing request string"))?;

    let pick: PickRequest = serde_json::from_str(request)?;

    let Some(&card_id) = pick.grp_ids.first() else {
        return Ok(None);
    };

    Ok(Some(DraftEvent::Pick(DraftPickEvent {
        draft_id: pick.draft_id,
        pack_number: pick.pack,
        pick_number: pick.pick,
        card_id,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CoursesResponse {
    #[serde(default)]
    courses: Vec<CourseRecord>,
}

/// One course (joined event) record. Fields vary by event type and client
/// version, so everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct CourseRecord {
    course_id: Option<String>,
    internal_event_name: Option<String>,
    course_deck: Option<CourseDeck>,
    card_pool: Vec<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct CourseDeck {
    main_deck: Vec<DeckEntry>,
    sideboard: Vec<DeckEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct DeckEntry {
    #[serde(rename = "cardId")]
    card_id: u32,
    quantity: u32,
}

impl CourseRecord {
    /// Limited event (draft/sealed) with something in the deck or pool.
    fn is_active_limited(&self) -> bool {
        let name_matches = self.internal_event_name.as_deref().is_some_and(|name| {
            let lower = name.to_lowercase();
            lower.contains("draft") || lower.contains("sealed")
        });
        name_matches && self.has_deck_payload()
    }

    fn has_deck_payload(&self) -> bool {
        let has_main = self
            .course_deck
            .as_ref()
            .is_some_and(|deck| !deck.main_deck.is_empty());
        has_main || !self.card_pool.is_empty()
    }

    fn into_snapshot(self, fallback_id: &str) -> DeckSnapshotEvent {
        let event_id = self
            .course_id
            .or(self.internal_event_name)
            .unwrap_or_else(|| fallback_id.to_string());

        match self.course_deck {
            Some(deck) if !deck.main_deck.is_empty() => DeckSnapshotEvent {
                event_id,
                main: flatten(&deck.main_deck),
                side: flatten(&deck.sideboard),
            },
            // Sealed pools that were never built into a deck: the whole
            // pool is the main list, one entry per card.
            _ => DeckSnapshotEvent {
                event_id,
                main: self.card_pool,
                side: Vec::new(),
            },
        }
    }
}

/// Expand `{cardId, quantity}` pairs into one entry per physical copy.
fn flatten(entries: &[DeckEntry]) -> Vec<u32> {
    entries
        .iter()
        .flat_map(|entry| std::iter::repeat(entry.card_id).take(entry.quantity as usize))
        .collect()
}

/// Courses messages: last active limited course wins.
fn normalize_courses(value: Value) -> Result<Option<DraftEvent>, LineError> {
    let response: CoursesResponse = serde_json::from_value(value)
        .map_err(|_| LineError::ShapeMismatch("not a courses response"))?;

    let last_active = response
        .courses
        .into_iter()
        .rev()
        .find(CourseRecord::is_active_limited);

    Ok(last_active.map(|course| DraftEvent::Deck(course.into_snapshot("imported"))))
}

/// Deck-import messages: a single course record, or a bare deck object.
fn normalize_deck_import(value: Value) -> Result<Option<DraftEvent>, LineError> {
    let record: CourseRecord = serde_json::from_value(value.clone())
        .map_err(|_| LineError::ShapeMismatch("not a course deck response"))?;

    if record.has_deck_payload() {
        return Ok(Some(DraftEvent::Deck(record.into_snapshot("imported"))));
    }

    // Some responses skip the course wrapper and log the deck directly.
    let deck: CourseDeck = serde_json::from_value(value)
        .map_err(|_| LineError::ShapeMismatch("not a course deck response"))?;
    if deck.main_deck.is_empty() {
        return Ok(None);
    }

    Ok(Some(DraftEvent::Deck(DeckSnapshotEvent {
        event_id: "imported".to_string(),
        main: flatten(&deck.main_deck),
        side: flatten(&deck.sideboard),
    })))
}

fn id_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
