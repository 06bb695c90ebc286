//! SSE (Server-Sent Events) stream handling.
//!
//! The Card Oracle backend streams answers as blank-line-delimited SSE
//! frames, each carrying one `data: <json>` payload:
//! - `data: {"type":"chunk","content":"..."}` - streamed answer text
//! - Blank line - signals end of frame
//! - CRLF and LF line endings are both accepted
//!
//! # Module structure
//! - `frames` - buffer accumulation and frame splitting (FrameBuffer)
//! - `decode` - payload decoding into typed events (StreamEvent)

mod decode;
mod frames;

pub use decode::{decode_event, StreamEvent};
pub use frames::{split_frames, FrameBuffer};
