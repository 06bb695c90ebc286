//! The streaming chat state machine.
//!
//! A session moves `Idle -> Streaming -> Terminated` per turn and applies
//! stream events to the transcript in arrival order. Per-event anomalies
//! (undecodable payloads, failed card lookups) are absorbed into the
//! transcript as inline text; only transport failures and a stream that
//! ends without `done` surface as session-level errors.

use tracing::{debug, warn};

use crate::cards::{normalize_card_id, CardResolver};
use crate::sse::{decode_event, StreamEvent};

use super::message::ChatMessage;
use super::transcript::Transcript;

/// Sentinel payload some backends emit instead of a `done` event; it is
/// silently ignored.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Placeholder label when `seeking_card` carries no usable text.
pub const DEFAULT_SEEKING_LABEL: &str = "Searching for card details";

const INVALID_CARD_NOTICE: &str = "Card lookup skipped: invalid card id.";
const ENDED_EARLY_ERROR: &str = "Stream ended before a done event was received.";

/// Lifecycle of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Streaming,
    Terminated,
}

#[derive(Debug, Default, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    phase: Phase,
    /// Session-level error or warning, shown outside the transcript.
    error: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_streaming(&self) -> bool {
        self.phase() == Phase::Streaming
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    /// Start a new turn for a submitted query.
    ///
    /// Returns the trimmed query when accepted. A blank query, or a submit
    /// while a stream is already active, is rejected (no state change).
    pub fn begin_turn(&mut self, raw_query: &str) -> Option<String> {
        let query = raw_query.trim();
        if query.is_empty() || self.is_streaming() {
            return None;
        }

        self.error = None;
        self.phase = Phase::Streaming;
        self.transcript.open_turn(query);
        Some(query.to_string())
    }

    /// Apply one frame payload in arrival order.
    ///
    /// Returns `true` when the turn reached its terminal `done` event, at
    /// which point the caller must stop consuming the transport even if
    /// more payloads are buffered.
    pub async fn apply_payload<R: CardResolver>(&mut self, payload: &str, resolver: &R) -> bool {
        if payload.is_empty() || payload == DONE_SENTINEL {
            return false;
        }

        match decode_event(payload) {
            // Decode failure: treat the payload as literal answer text
            None => {
                debug!(payload, "undecodable stream payload, appending verbatim");
                self.transcript.append_text(payload);
                false
            }
            Some(event) => self.apply_event(event, resolver).await,
        }
    }

    /// Apply one decoded event. Returns `true` on `done`.
    pub async fn apply_event<R: CardResolver>(&mut self, event: StreamEvent, resolver: &R) -> bool {
        match event {
            StreamEvent::Chunk { content } => {
                self.transcript.append_text(&content);
                false
            }
            StreamEvent::SeekingCard { label } => {
                let label = label
                    .as_deref()
                    .map(str::trim)
                    .filter(|trimmed| !trimmed.is_empty())
                    .unwrap_or(DEFAULT_SEEKING_LABEL);
                self.transcript.set_seeking(Some(label.to_string()));
                false
            }
            StreamEvent::FoundCard { id } => {
                self.transcript.set_seeking(None);
                self.resolve_and_attach(&id, resolver).await;
                false
            }
            StreamEvent::Done => {
                self.complete_turn();
                true
            }
            StreamEvent::Meta => false,
        }
    }

    /// Normalize the id, fetch the card, and attach it. Every failure mode
    /// leaves an inline notice and lets the stream continue.
    async fn resolve_and_attach<R: CardResolver>(&mut self, raw_id: &str, resolver: &R) {
        let id = normalize_card_id(raw_id);
        if id.is_empty() {
            warn!(raw_id, "found_card id normalized to nothing, skipping lookup");
            self.transcript.append_notice(INVALID_CARD_NOTICE);
            return;
        }

        match resolver.resolve(&id).await {
            Ok(card) => {
                debug!(card_id = %card.id, card_name = %card.name, "card attached");
                self.transcript.attach_card(card);
            }
            Err(err) => {
                warn!(card_id = %id, error = %err, "card lookup failed");
                self.transcript.append_notice(&err.to_string());
            }
        }
    }

    /// Handle the transport closing without a `done` event.
    ///
    /// Any trailing partial frame is salvaged best-effort: decoded as a
    /// final chunk if it matches, appended verbatim if it is not an event
    /// at all. The session then carries a non-fatal warning.
    pub fn finish(&mut self, remainder: &str) {
        let trimmed = remainder.trim();
        if !trimmed.is_empty() {
            match decode_event(trimmed) {
                Some(StreamEvent::Chunk { content }) => self.transcript.append_text(&content),
                None => self.transcript.append_text(remainder),
                Some(_) => {}
            }
        }

        warn!("stream ended without a done event");
        self.error = Some(ENDED_EARLY_ERROR.to_string());
        self.end_turn();
    }

    /// Abandon the in-progress turn, typically after the future driving
    /// the stream was dropped in favor of a new query.
    ///
    /// The partial assistant message stays as received, no error is
    /// recorded, and the session accepts the next `begin_turn`. A no-op
    /// outside the streaming phase.
    pub fn cancel_turn(&mut self) {
        if self.is_streaming() {
            debug!("turn cancelled");
            self.end_turn();
        }
    }

    /// Handle an unrecoverable transport failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "stream failed");
        self.error = Some(message);
        self.end_turn();
    }

    fn complete_turn(&mut self) {
        self.transcript.set_seeking(None);
        self.end_turn();
    }

    fn end_turn(&mut self) {
        self.transcript.set_seeking(None);
        self.transcript.close_turn();
        self.phase = Phase::Terminated;
    }
}
