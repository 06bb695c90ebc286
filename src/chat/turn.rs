//! Driving a response byte stream through the session.
//!
//! A single sequential consumer: await one chunk, process every payload it
//! completed (card fetches awaited in event order), then await the next
//! chunk. Dropping the returned future cancels the turn cleanly - all
//! transcript mutations happen synchronously between awaits, so the
//! in-progress assistant message is left as-is, simply no longer updated.
//! After dropping, the caller must call [`ChatSession::cancel_turn`] to
//! release the streaming phase before starting the next query.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tracing::debug;

use crate::cards::CardResolver;
use crate::sse::FrameBuffer;

use super::session::ChatSession;

/// Consume a streaming response body to the end of the current turn.
///
/// Processing stops at the first `done` event even if more bytes are
/// buffered. A mid-stream transport error fails the session; end-of-data
/// without `done` finishes it with the ended-early warning.
pub async fn run_turn<S, E, R>(session: &mut ChatSession, stream: S, resolver: &R)
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
    R: CardResolver,
{
    futures_util::pin_mut!(stream);

    let mut frames = FrameBuffer::new();
    // Bytes of a multi-byte character split across network reads
    let mut carry: Vec<u8> = Vec::new();

    while let Some(next) = stream.next().await {
        match next {
            Ok(chunk) => {
                carry.extend_from_slice(&chunk);
                let text = drain_decodable(&mut carry);

                for payload in frames.push(&text) {
                    if session.apply_payload(&payload, resolver).await {
                        debug!("done event received, dropping remaining transport bytes");
                        return;
                    }
                }
            }
            Err(err) => {
                session.fail(err.to_string());
                return;
            }
        }
    }

    if !carry.is_empty() {
        // Dangling incomplete codepoint at end-of-data; salvage what it
        // renders as
        for payload in frames.push(&String::from_utf8_lossy(&carry)) {
            if session.apply_payload(&payload, resolver).await {
                return;
            }
        }
    }
    session.finish(&frames.take_remainder());
}

/// Decode everything decodable from the carry buffer.
///
/// Invalid sequences become U+FFFD and decoding continues past them; only
/// a trailing incomplete codepoint stays buffered for the next read.
fn drain_decodable(carry: &mut Vec<u8>) -> String {
    let mut text = String::new();
    loop {
        match std::str::from_utf8(carry) {
            Ok(valid) => {
                text.push_str(valid);
                carry.clear();
                return text;
            }
            Err(err) => {
                let valid = err.valid_up_to();
                text.push_str(&String::from_utf8_lossy(&carry[..valid]));
                match err.error_len() {
                    // Invalid sequence: replace it and keep decoding
                    Some(len) => {
                        text.push('\u{FFFD}');
                        carry.drain(..valid + len);
                    }
                    // Incomplete trailing codepoint: wait for more bytes
                    None => {
                        carry.drain(..valid);
                        return text;
                    }
                }
            }
        }
    }
}
