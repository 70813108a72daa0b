//! # Conversation Store
//!
//! Ordered message history plus the draft the user is typing.
//!
//! ```text
//! ConversationStore
//! ├── messages: Vec<Message>   // append-only, never empty
//! └── draft: String            // replaced wholesale on every edit
//! ```
//!
//! The store does no validation of its own. Callers trim content before
//! appending; the store only guarantees ordering and the seeded greeting.

use crate::core::message::{Message, Role};

pub struct ConversationStore {
    messages: Vec<Message>,
    draft: String,
}

impl ConversationStore {
    /// Creates a store seeded with a single assistant greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
            draft: String::new(),
        }
    }

    pub fn append_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the store is seeded on creation and never shrinks.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
