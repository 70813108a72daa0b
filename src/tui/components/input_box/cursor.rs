//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the scroll offset. All
//! methods accept `buffer: &str` explicitly; the text itself is owned by
//! `InputBox`.

use super::text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, inner_width, wrap_line_count,
    wrap_options,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }
        let lines = textwrap::wrap(&buffer[..self.pos], wrap_options(width));
        lines.len().saturating_sub(1) as u16
    }

    /// Update scroll offset to keep the cursor visible.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        let total_lines = wrap_line_count(buffer, width);

        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen position `(column, row)` for the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + CONTENT_OFFSET_X.min(area.width), area.y + CONTENT_OFFSET_Y);
        }

        let text_before_cursor = &buffer[..self.pos];
        let lines = textwrap::wrap(text_before_cursor, wrap_options(width));
        let cursor_line = lines.len().saturating_sub(1) as u16;

        // Wrapped lines are in-order substrings of the input with the break
        // whitespace dropped, so locate the last one and measure the raw text
        // from there to keep trailing spaces.
        let mut search_from = 0;
        let mut last_start = 0;
        for line in &lines {
            if let Some(found) = text_before_cursor[search_from..].find(&line[..]) {
                last_start = search_from + found;
                search_from = last_start + line.len();
            }
        }
        let cursor_col = (text_before_cursor[last_start..].width() as u16).min(width);

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);
        (
            area.x + CONTENT_OFFSET_X + cursor_col,
            area.y + CONTENT_OFFSET_Y + visible_line,
        )
    }
}
