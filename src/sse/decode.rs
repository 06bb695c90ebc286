//! Decoding frame payloads into typed stream events.

use serde_json::Value;

/// Typed events carried by the `/search/stream` response.
///
/// The wire format is a JSON object tagged by `type`. Anything the decoder
/// cannot make sense of as an object becomes a decode failure (`None`),
/// which the reducer treats as literal text; recognizably-shaped objects
/// with an unusable or unknown tag decode to the inert [`StreamEvent::Meta`]
/// so they are silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Append text to the active assistant message.
    Chunk { content: String },
    /// The backend is looking up a card; optional human-readable label.
    SeekingCard { label: Option<String> },
    /// A card lookup is ready; fetch and attach the full card.
    FoundCard { id: String },
    /// Terminal: the turn is complete.
    Done,
    /// Reserved / unrecognized; carries nothing and mutates nothing.
    Meta,
}

/// Decode one frame payload, returning `None` on any parse failure.
///
/// Never panics: a payload that is not a JSON object is simply not an
/// event, and the caller falls back to appending it verbatim.
pub fn decode_event(payload: &str) -> Option<StreamEvent> {
    let value: Value = serde_json::from_str(payload).ok()?;
    let object = value.as_object()?;

    let event = match object.get("type").and_then(Value::as_str) {
        Some("chunk") => match object.get("content").and_then(Value::as_str) {
            Some(content) => StreamEvent::Chunk {
                content: content.to_string(),
            },
            // A chunk without string content carries nothing usable
            None => StreamEvent::Meta,
        },
        Some("seeking_card") => StreamEvent::SeekingCard {
            label: object
                .get("content")
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        Some("found_card") => match object.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => StreamEvent::FoundCard { id: id.to_string() },
            _ => StreamEvent::Meta,
        },
        Some("done") => StreamEvent::Done,
        // "meta" is reserved, unknown tags are dropped for resilience
        _ => StreamEvent::Meta,
    };

    Some(event)
}
