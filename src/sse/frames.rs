//! Splitting a growing byte buffer into complete SSE frames.
//!
//! Network reads can cut a frame anywhere, so the splitter always treats
//! the fragment after the last blank-line delimiter as an incomplete
//! remainder to be glued onto the next read.

use once_cell::sync::Lazy;
use regex::Regex;

static FRAME_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n\r?\n").unwrap());
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").unwrap());

const DATA_PREFIX: &str = "data:";

/// Split a buffer into complete frame payloads and the unconsumed remainder.
///
/// Frames are delimited by blank lines (CRLF or LF). Within a frame only
/// `data:`-prefixed lines are kept; the prefix plus at most one following
/// space is stripped, and multi-line data is rejoined with `\n`. Frames
/// that reduce to nothing are dropped.
///
/// Malformed input never errors - it just yields no usable frames.
pub fn split_frames(buffer: &str) -> (Vec<String>, String) {
    let mut raw_frames: Vec<&str> = FRAME_DELIMITER.split(buffer).collect();
    let remainder = raw_frames.pop().unwrap_or("").to_string();

    let mut payloads = Vec::new();
    for raw in raw_frames {
        let payload: Vec<&str> = LINE_BREAK
            .split(raw)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(strip_data_prefix)
            .collect();

        let payload = payload.join("\n");
        if !payload.is_empty() {
            payloads.push(payload);
        }
    }

    (payloads, remainder)
}

fn strip_data_prefix(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(DATA_PREFIX)?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Stateful frame accumulator for a single stream.
///
/// Each `push` appends a decoded chunk of the response body and returns
/// every payload that became complete; the trailing partial frame stays
/// buffered for the next push.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: String,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain all completed frame payloads.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);
        let (payloads, remainder) = split_frames(&self.buffer);
        self.buffer = remainder;
        payloads
    }

    /// Take whatever partial frame is still buffered.
    ///
    /// Called once the transport signals end-of-data, so trailing content
    /// can be salvaged even without a final delimiter.
    pub fn take_remainder(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
