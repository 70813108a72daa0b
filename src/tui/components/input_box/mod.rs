//! # InputBox Component
//!
//! The draft editor at the bottom of the chat area.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing and bracketed paste)
//! - Handle editing (backspace, delete, cursor movement)
//! - Handle submission (Enter or a click on the send control)
//! - Show a placeholder while the draft is empty
//!
//! ## State Management
//!
//! The buffer mirrors the draft held by the core `ConversationStore`. Edits
//! are made here and reported with `InputEvent::ContentChanged`; the event
//! loop forwards them as `Action::SetDraft`. Whether a submission clears the
//! draft is decided by the core, after which [`InputBox::sync_draft`] pulls
//! the result back in.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrap_options,
};

pub const PLACEHOLDER: &str = "Type your message...";
const SEND_LABEL: &str = " ➤ Send ";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User asked to send the draft (Enter pressed)
    Submit,
    /// Buffer text changed
    ContentChanged,
    /// Cursor moved without changing the text
    CursorMoved,
}

/// Draft editor with a send control.
///
/// # Props
///
/// - `palette`: colours for the active theme
///
/// # State
///
/// - `buffer`: the draft text
/// - `cursor`: cursor position and scroll state (see `CursorState`)
pub struct InputBox {
    pub buffer: String,
    pub palette: Palette,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            palette,
            cursor: CursorState::new(),
        }
    }

    /// Calculate required height for current buffer content, clamped to viewport limits.
    /// Returns value in range [1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD].
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        content_lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Replace the buffer with the core's draft if they have diverged.
    ///
    /// A cleared draft resets the cursor to the start; any other replacement
    /// puts it at the end.
    pub fn sync_draft(&mut self, draft: &str) {
        if self.buffer == draft {
            return;
        }
        self.buffer = draft.to_string();
        if self.buffer.is_empty() {
            self.cursor.reset();
        } else {
            self.cursor.pos = self.buffer.len();
        }
    }

    /// Where the send control sits on the top border of a box drawn at `area`.
    pub fn send_button_rect(area: Rect) -> Rect {
        let width = (SEND_LABEL.width() as u16).min(area.width.saturating_sub(2));
        let x = area.right().saturating_sub(1 + width).max(area.x);
        Rect::new(x, area.y, width, 1.min(area.height))
    }

    /// Wrapped lines currently in view.
    fn visible_lines(&self, content_width: u16) -> Vec<String> {
        let width = inner_width(content_width);
        if width == 0 {
            return Vec::new();
        }

        textwrap::wrap(&self.buffer, wrap_options(width))
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|line| line.into_owned())
            .collect()
    }

    /// Render scrollbar when content exceeds visible area
    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let total_lines = wrap_line_count(&self.buffer, inner_width(area.width));
        if total_lines <= MAX_VISIBLE_LINES {
            return;
        }

        // content_length is the max scroll position, not the line count
        let max_scroll = total_lines.saturating_sub(MAX_VISIBLE_LINES);
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.input_border))
            .title_top(
                Line::styled(SEND_LABEL, Style::default().fg(self.palette.muted)).right_aligned(),
            )
            .style(
                Style::default()
                    .fg(self.palette.input_text)
                    .bg(self.palette.input_background),
            )
            .padding(Padding::horizontal(1));

        let content = if self.buffer.is_empty() {
            Paragraph::new(Line::styled(
                PLACEHOLDER,
                Style::default().fg(self.palette.faint),
            ))
        } else {
            let lines: Vec<Line> = self
                .visible_lines(area.width)
                .into_iter()
                .map(Line::from)
                .collect();
            Paragraph::new(lines)
        };

        frame.render_widget(content.block(block), area);
        self.render_scrollbar(frame, area);

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor.pos, text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::CursorMoved
            }),
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn input_box() -> InputBox {
        InputBox::new(Palette::for_theme(Theme::Dark))
    }

    fn render_text(input: &mut InputBox, width: u16) -> String {
        let height = input.calculate_height(width);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_input_box_new() {
        let input = input_box();
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_handle_input() {
        let mut input = input_box();

        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('a')),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        assert_eq!(
            input.handle_event(&TuiEvent::Backspace),
            Some(InputEvent::ContentChanged)
        );
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_cursor_movement_edits_in_place() {
        let mut input = input_box();
        input.handle_event(&TuiEvent::Paste("hllo".to_string()));

        input.handle_event(&TuiEvent::CursorHome);
        assert_eq!(
            input.handle_event(&TuiEvent::CursorRight),
            Some(InputEvent::CursorMoved)
        );
        input.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(input.buffer, "hello");

        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hell");
    }

    #[test]
    fn test_boundaries_emit_nothing() {
        let mut input = input_box();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorLeft), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorEnd), None);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = input_box();
        input.handle_event(&TuiEvent::Paste("héllo😀".to_string()));
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "héllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hllo");
    }

    #[test]
    fn test_submit_does_not_clear_buffer_itself() {
        let mut input = input_box();
        input.buffer = "hello".to_string();
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit)
        );
        assert_eq!(input.buffer, "hello");
    }

    #[test]
    fn test_sync_draft_clears_and_resets_cursor() {
        let mut input = input_box();
        input.handle_event(&TuiEvent::Paste("hello".to_string()));
        input.sync_draft("");
        assert!(input.buffer.is_empty());

        // Cursor is back at 0, so the next char lands at the start
        input.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_sync_draft_noop_when_equal() {
        let mut input = input_box();
        input.handle_event(&TuiEvent::Paste("abc".to_string()));
        input.handle_event(&TuiEvent::CursorHome);
        input.sync_draft("abc");
        input.handle_event(&TuiEvent::InputChar('>'));
        assert_eq!(input.buffer, ">abc");
    }

    #[test]
    fn test_height_grows_then_caps() {
        let mut input = input_box();
        assert_eq!(input.calculate_height(14), 1 + VERTICAL_OVERHEAD);

        input.buffer = "word ".repeat(40);
        assert_eq!(
            input.calculate_height(14),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_render_placeholder_and_send_label() {
        let mut input = input_box();
        let text = render_text(&mut input, 50);
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Send"));
    }

    #[test]
    fn test_render_buffer_replaces_placeholder() {
        let mut input = input_box();
        input.handle_event(&TuiEvent::Paste("hello there".to_string()));
        let text = render_text(&mut input, 50);
        assert!(text.contains("hello there"));
        assert!(!text.contains(PLACEHOLDER));
    }

    #[test]
    fn test_send_button_rect() {
        let rect = InputBox::send_button_rect(Rect::new(0, 10, 50, 3));
        assert_eq!(rect, Rect::new(41, 10, 8, 1));
    }
}
