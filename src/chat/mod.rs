//! Conversation state: messages, the transcript, the streaming reducer,
//! and the turn pump that drives a response stream into it.
//!
//! # Module structure
//! - `message` - ChatMessage and Role
//! - `transcript` - append-only history with an explicit active turn
//! - `session` - the idle/streaming/terminated state machine
//! - `turn` - the sequential byte-chunk consumer

mod message;
mod session;
mod transcript;
mod turn;

pub use message::{ChatMessage, Role};
pub use session::{ChatSession, Phase, DEFAULT_SEEKING_LABEL, DONE_SENTINEL};
pub use transcript::Transcript;
pub use turn::run_turn;
