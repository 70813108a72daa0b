//! # TUI Components
//!
//! Every visible region of the chat surface is a component.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created fresh each frame with everything they draw:
//! - `Header`: title, reply status, and the theme toggle on narrow terminals
//! - `Sidebar`: "New Chat" entry, user name, and the theme toggle
//! - `MessageView`: one conversation entry with its avatar
//!
//! ### Stateful Components (Event-Driven)
//!
//! Own state that survives between frames and emit events:
//! - `InputBox`: the draft editor with its send control
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! Components receive the active `Palette` as a prop and never look at the
//! theme flag directly.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (top bar)
//! ├── sidebar.rs       (left panel, wide terminals only)
//! ├── message.rs       (single message renderer)
//! ├── message_list.rs  (scrollable message container)
//! └── input_box/       (draft editor + send control)
//! ```

pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod sidebar;

pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use sidebar::Sidebar;

use unicode_width::UnicodeWidthChar;

/// Cut `text` to at most `max_width` terminal columns, ending in `…` when shortened.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1; // room for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
