//! The conversation transcript.
//!
//! History is append-only; only the explicitly-tracked active turn may be
//! mutated, and only while it is both the last entry and an assistant
//! message. Every mutation degrades to a no-op when that precondition
//! fails - events arriving out of order or after the turn ended must never
//! corrupt historical entries.

use crate::cards::Card;

use super::message::{ChatMessage, Role};

#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    /// Index of the assistant message currently receiving stream updates.
    active_turn: Option<usize>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append the user message and the empty assistant placeholder for a
    /// new turn, making the placeholder the active turn.
    pub fn open_turn(&mut self, query: impl Into<String>) {
        self.messages.push(ChatMessage::user(query));
        self.messages.push(ChatMessage::assistant_placeholder());
        self.active_turn = Some(self.messages.len() - 1);
    }

    /// Close the active turn; the assistant message becomes immutable.
    pub fn close_turn(&mut self) {
        self.active_turn = None;
    }

    pub fn has_active_turn(&self) -> bool {
        self.active_turn.is_some()
    }

    /// The mutation guard: the active turn must still be the last entry
    /// and must be an assistant message.
    fn active_assistant_mut(&mut self) -> Option<&mut ChatMessage> {
        let index = self.active_turn?;
        if index + 1 != self.messages.len() {
            return None;
        }
        let message = self.messages.get_mut(index)?;
        (message.role == Role::Assistant).then_some(message)
    }

    /// Append streamed text to the active assistant message.
    ///
    /// Empty text and a missing active turn are both no-ops.
    pub fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(message) = self.active_assistant_mut() {
            message.content.push_str(text);
        }
    }

    /// Append an inline notice on its own line of the active message.
    ///
    /// Used for recoverable anomalies (failed or skipped card lookups) so
    /// the user sees a continuous conversation rather than an error state.
    pub fn append_notice(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(message) = self.active_assistant_mut() {
            if !message.content.is_empty() {
                message.content.push('\n');
            }
            message.content.push_str(text);
            message.content.push('\n');
        }
    }

    /// Enter (`Some(label)`) or clear (`None`) the seeking-card state.
    pub fn set_seeking(&mut self, label: Option<String>) {
        if let Some(message) = self.active_assistant_mut() {
            message.seeking = label;
        }
    }

    /// Attach a fetched card to the active message, clearing the seeking
    /// state. A card whose id is already attached is dropped.
    pub fn attach_card(&mut self, card: Card) {
        if let Some(message) = self.active_assistant_mut() {
            message.seeking = None;
            if message.cards.iter().any(|existing| existing.id == card.id) {
                return;
            }
            message.cards.push(card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, name: &str) -> Card {
        serde_json::from_str(&format!(r#"{{"id":"{}","name":"{}"}}"#, id, name)).unwrap()
    }

    #[test]
    fn test_mutations_on_empty_transcript_are_noops() {
        let mut transcript = Transcript::new();
        transcript.append_text("hello");
        transcript.append_notice("notice");
        transcript.set_seeking(Some("label".to_string()));
        transcript.attach_card(card("a", "A"));
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_open_turn_creates_user_and_placeholder() {
        let mut transcript = Transcript::new();
        transcript.open_turn("what does Lightning Bolt do?");
        assert_eq!(transcript.messages().len(), 2);
        assert_eq!(transcript.messages()[0].role, Role::User);
        assert_eq!(transcript.messages()[1].role, Role::Assistant);
        assert!(transcript.has_active_turn());
    }

    #[test]
    fn test_append_text_targets_active_assistant() {
        let mut transcript = Transcript::new();
        transcript.open_turn("q");
        transcript.append_text("Hello");
        transcript.append_text(" world");
        transcript.append_text(""); // no-op
        assert_eq!(transcript.last().unwrap().content, "Hello world");
    }

    #[test]
    fn test_mutations_after_close_are_noops() {
        let mut transcript = Transcript::new();
        transcript.open_turn("q");
        transcript.append_text("final");
        transcript.close_turn();
        transcript.append_text(" late");
        transcript.attach_card(card("a", "A"));
        let last = transcript.last().unwrap();
        assert_eq!(last.content, "final");
        assert!(last.cards.is_empty());
    }

    #[test]
    fn test_attach_card_dedupes_by_id() {
        let mut transcript = Transcript::new();
        transcript.open_turn("q");
        transcript.attach_card(card("abc", "First"));
        transcript.attach_card(card("abc", "Duplicate"));
        transcript.attach_card(card("def", "Second"));
        let cards = &transcript.last().unwrap().cards;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "First");
        assert_eq!(cards[1].name, "Second");
    }

    #[test]
    fn test_attach_card_clears_seeking() {
        let mut transcript = Transcript::new();
        transcript.open_turn("q");
        transcript.set_seeking(Some("Searching".to_string()));
        assert!(transcript.last().unwrap().is_seeking());
        transcript.attach_card(card("abc", "Card"));
        assert!(!transcript.last().unwrap().is_seeking());
    }

    #[test]
    fn test_notice_separator_rules() {
        let mut transcript = Transcript::new();
        transcript.open_turn("q");
        transcript.append_notice("first notice");
        assert_eq!(transcript.last().unwrap().content, "first notice\n");
        transcript.append_text("text");
        transcript.append_notice("second notice");
        assert_eq!(
            transcript.last().unwrap().content,
            "first notice\ntext\nsecond notice\n"
        );
    }
}
