//! # Core Application Logic
//!
//! Parley's conversation logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ConversationStore    │
//!                    │  • ChatSurface (state)  │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                         ┌──────┴─────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message` and `Role`
//! - [`conversation`]: `ConversationStore`, the ordered history plus the draft
//! - [`state`]: `ChatSurface`, everything the adapter renders
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`theme`]: the light/dark flag
//! - [`config`]: layered settings (file, env, CLI)

pub mod action;
pub mod config;
pub mod conversation;
pub mod message;
pub mod state;
pub mod theme;
