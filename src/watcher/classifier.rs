//! Line classification state machine.
//!
//! MTGA writes most interesting records as `<marker> ... {json}` on a
//! single line, but request/response headers sometimes land on one line
//! with the JSON body on the next. The classifier matches marker
//! substrings from `Idle` and, for headers without an inline body,
//! transitions to `AwaitingBody` until a line starting with `{` arrives.

/// The message kind a matched line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Pack contents notification (`Draft.Notify` / `BotDraft`).
    Pack,
    /// Pick request (`EventPlayerDraftMakePick ==>`).
    Pick,
    /// Active-courses response (`EventGetCoursesV2 <==`).
    Courses,
    /// Single course-deck response (`EventGetCourseDeckV2 <==`).
    DeckImport,
}

/// A classified line, ready for payload extraction.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub kind: MarkerKind,
    pub line: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    AwaitingBody(MarkerKind),
}

/// Decides which extraction routine applies to each complete line.
#[derive(Debug)]
pub struct EventClassifier {
    state: State,
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl EventClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Classify one complete logical line.
    ///
    /// Returns the raw events the line dispatches. Marker rules are
    /// checked independently, so a single line can dispatch more than one
    /// kind. Unmatched lines return an empty vec.
    ///
    /// While awaiting a body, intervening lines that do not start with
    /// `{` are skipped without bound; the expected body may be separated
    /// from its header by unrelated log noise.
    pub fn classify(&mut self, line: &str) -> Vec<RawEvent> {
        if let State::AwaitingBody(kind) = self.state {
            if line.trim_start().starts_with('{') {
                tracing::debug!(kind = ?kind, "Received deferred JSON body");
                self.state = State::Idle;
                return vec![RawEvent {
                    kind,
                    line: line.to_string(),
                }];
            }
            tracing::debug!(kind = ?kind, "Skipping noise line while awaiting body");
            return Vec::new();
        }

        let has_json = line.contains('{');
        let mut events = Vec::new();

        if (line.contains("Draft.Notify") || line.contains("BotDraft")) && has_json {
            events.push(RawEvent {
                kind: MarkerKind::Pack,
                line: line.to_string(),
            });
        }

        if line.contains("EventPlayerDraftMakePick") && line.contains("==>") {
            if has_json {
                events.push(RawEvent {
                    kind: MarkerKind::Pick,
                    line: line.to_string(),
                });
            } else {
                self.await_body(MarkerKind::Pick);
            }
        }

        if line.contains("EventGetCoursesV2") && line.contains("<==") {
            if has_json {
                events.push(RawEvent {
                    kind: MarkerKind::Courses,
                    line: line.to_string(),
                });
            } else {
                self.await_body(MarkerKind::Courses);
            }
        }

        if line.contains("EventGetCourseDeckV2") && line.contains("<==") {
            if has_json {
                events.push(RawEvent {
                    kind: MarkerKind::DeckImport,
                    line: line.to_string(),
                });
            } else {
                self.await_body(MarkerKind::DeckImport);
            }
        }

        events
    }

    /// Forget any pending header (after a file truncation/rotation).
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Whether a header is waiting for its JSON body.
    #[must_use]
    pub fn is_awaiting_body(&self) -> bool {
        matches!(self.state, State::AwaitingBody(_))
    }

    fn await_body(&mut self, kind: MarkerKind) {
        tracing::debug!(kind = ?kind, "Header without inline body, awaiting next JSON line");
        self.state = State::AwaitingBody(kind);
    }
}
