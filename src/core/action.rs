//! # Actions
//!
//! Everything that can happen to the chat surface becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! A reply timer fires? That's `Action::SimulatedReply`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter what I/O to perform next. No side effects happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::debug;

use crate::core::state::ChatSurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The input box content changed.
    SetDraft(String),
    /// Send the current draft.
    Submit,
    /// A reply timer elapsed.
    SimulatedReply,
    ToggleTheme,
    Quit,
}

/// Work the adapter must do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start a one-shot timer that sends `Action::SimulatedReply` after the delay.
    ScheduleReply(Duration),
    Quit,
}

pub fn update(surface: &mut ChatSurface, action: Action) -> Effect {
    debug!("Applying action: {:?}", action);
    match action {
        Action::SetDraft(text) => {
            surface.conversation.set_draft(text);
            Effect::None
        }
        Action::Submit => surface
            .submit()
            .map_or(Effect::None, Effect::ScheduleReply),
        Action::SimulatedReply => {
            surface.receive_simulated_reply();
            Effect::None
        }
        Action::ToggleTheme => {
            surface.toggle_theme();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
