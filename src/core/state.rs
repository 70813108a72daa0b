//! # Chat Surface State
//!
//! Core state for Parley. Domain logic only; presentation state (scroll
//! offsets, hover, cursor) lives in the `tui` module.
//!
//! ```text
//! ChatSurface
//! ├── conversation: ConversationStore  // messages + draft
//! ├── theme: Theme                     // light/dark flag
//! ├── pending_replies: usize           // simulated replies still in flight
//! ├── reply_delay: Duration            // how long each reply waits
//! ├── placeholder_reply: String        // the only thing the "assistant" says
//! ├── user_name: String                // sidebar label
//! └── footer: String                   // credit line under the input
//! ```
//!
//! State changes go through `update(surface, action)` in action.rs, which
//! calls the methods below.

use std::time::Duration;

use log::{debug, info};

use crate::core::config::{
    DEFAULT_FOOTER, DEFAULT_GREETING, DEFAULT_PLACEHOLDER_REPLY, DEFAULT_REPLY_DELAY_MS,
    DEFAULT_USER_NAME, ResolvedConfig,
};
use crate::core::conversation::ConversationStore;
use crate::core::message::Role;
use crate::core::theme::Theme;

pub struct ChatSurface {
    pub conversation: ConversationStore,
    pub theme: Theme,
    /// Submissions whose simulated reply has not landed yet.
    pub pending_replies: usize,
    pub reply_delay: Duration,
    pub placeholder_reply: String,
    pub user_name: String,
    pub footer: String,
}

impl Default for ChatSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSurface {
    /// Surface with built-in defaults (dark theme, 1s reply delay).
    pub fn new() -> Self {
        Self {
            conversation: ConversationStore::new(DEFAULT_GREETING),
            theme: Theme::default(),
            pending_replies: 0,
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            placeholder_reply: DEFAULT_PLACEHOLDER_REPLY.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            conversation: ConversationStore::new(config.greeting.clone()),
            theme: config.theme,
            pending_replies: 0,
            reply_delay: config.reply_delay,
            placeholder_reply: config.placeholder_reply.clone(),
            user_name: config.user_name.clone(),
            footer: config.footer.clone(),
        }
    }

    /// Sends the current draft.
    ///
    /// A blank draft is ignored and left as-is. Otherwise the trimmed text is
    /// appended as a user message, the draft is cleared, and the delay the
    /// caller should wait before delivering the reply is returned.
    pub fn submit(&mut self) -> Option<Duration> {
        let text = self.conversation.draft().trim();
        if text.is_empty() {
            debug!("Ignoring blank submission");
            return None;
        }

        let text = text.to_string();
        info!("Submitting user message ({} bytes)", text.len());
        self.conversation.append_message(Role::User, text);
        self.conversation.clear_draft();
        self.pending_replies += 1;
        Some(self.reply_delay)
    }

    /// Lands one simulated reply.
    pub fn receive_simulated_reply(&mut self) {
        self.conversation
            .append_message(Role::Assistant, self.placeholder_reply.clone());
        self.pending_replies = self.pending_replies.saturating_sub(1);
        debug!(
            "Simulated reply delivered ({} still pending)",
            self.pending_replies
        );
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!("Theme switched to {}", self.theme.label());
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.pending_replies > 0
    }

    /// Header status text. Empty when idle.
    pub fn status_message(&self) -> String {
        match self.pending_replies {
            0 => String::new(),
            1 => String::from("Waiting for reply…"),
            n => format!("Waiting for {n} replies…"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;

    #[test]
    fn new_surface_defaults() {
        let surface = ChatSurface::new();
        assert_eq!(surface.theme, Theme::Dark);
        assert_eq!(surface.reply_delay, Duration::from_millis(1000));
        assert_eq!(
            surface.conversation.messages(),
            [Message::assistant(
                "Hello! I am your AI assistant. How can I help you today?"
            )]
        );
        assert!(!surface.is_awaiting_reply());
    }

    #[test]
    fn submit_trims_and_clears_draft() {
        let mut surface = ChatSurface::new();
        surface.conversation.set_draft("  hi there \n");

        let delay = surface.submit();

        assert_eq!(delay, Some(Duration::from_millis(1000)));
        assert_eq!(surface.conversation.last(), Some(&Message::user("hi there")));
        assert_eq!(surface.conversation.draft(), "");
        assert_eq!(surface.pending_replies, 1);
    }

    #[test]
    fn blank_submit_leaves_everything_alone() {
        let mut surface = ChatSurface::new();
        surface.conversation.set_draft("   ");

        assert_eq!(surface.submit(), None);
        assert_eq!(surface.conversation.len(), 1);
        assert_eq!(surface.conversation.draft(), "   ");
        assert_eq!(surface.pending_replies, 0);
    }

    #[test]
    fn empty_submit_is_noop() {
        let mut surface = ChatSurface::new();
        assert_eq!(surface.submit(), None);
        assert_eq!(surface.conversation.len(), 1);
    }

    #[test]
    fn reply_appends_placeholder() {
        let mut surface = ChatSurface::new();
        surface.conversation.set_draft("hi");
        surface.submit();
        surface.receive_simulated_reply();

        assert_eq!(
            surface.conversation.last(),
            Some(&Message::assistant(
                "Missing Backend Connection: Front-end is not linked to a backend server."
            ))
        );
        assert_eq!(surface.pending_replies, 0);
    }

    #[test]
    fn toggle_theme_does_not_touch_messages() {
        let mut surface = ChatSurface::new();
        surface.conversation.set_draft("hi");
        surface.submit();
        let before = surface.conversation.messages().to_vec();

        surface.toggle_theme();
        assert_eq!(surface.theme, Theme::Light);
        surface.toggle_theme();
        assert_eq!(surface.theme, Theme::Dark);

        assert_eq!(surface.conversation.messages(), before.as_slice());
    }

    #[test]
    fn status_message_tracks_pending_count() {
        let mut surface = ChatSurface::new();
        assert_eq!(surface.status_message(), "");

        surface.conversation.set_draft("a");
        surface.submit();
        assert_eq!(surface.status_message(), "Waiting for reply…");

        surface.conversation.set_draft("b");
        surface.submit();
        assert_eq!(surface.status_message(), "Waiting for 2 replies…");
    }

    #[test]
    fn from_config_uses_resolved_values() {
        let config = ResolvedConfig {
            theme: Theme::Light,
            reply_delay: Duration::from_millis(250),
            user_name: "Ada".to_string(),
            footer: "Footer".to_string(),
            greeting: "Hey.".to_string(),
            placeholder_reply: "Offline.".to_string(),
        };
        let mut surface = ChatSurface::from_config(&config);
        assert_eq!(surface.theme, Theme::Light);
        assert_eq!(surface.conversation.messages(), [Message::assistant("Hey.")]);

        surface.conversation.set_draft("x");
        assert_eq!(surface.submit(), Some(Duration::from_millis(250)));
        surface.receive_simulated_reply();
        assert_eq!(surface.conversation.last(), Some(&Message::assistant("Offline.")));
    }
}
