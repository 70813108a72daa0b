//! # Header Component
//!
//! Top bar of the chat area.
//!
//! ## Responsibilities
//!
//! - Show the surface title
//! - Show the reply status while simulated replies are pending
//! - Carry the theme toggle when the sidebar is hidden
//!
//! The header is stateless. The toggle's position is exposed through
//! [`Header::toggle_rect`] so mouse hit testing and rendering agree on one
//! rectangle.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::components::truncate_to_width;
use crate::tui::palette::{Palette, toggle_glyph};

pub const TITLE: &str = "AI Chat Assistant";
/// Text row plus the bottom border.
pub const HEADER_HEIGHT: u16 = 2;
/// " ☀ ": glyph with one column of padding each side.
const TOGGLE_WIDTH: u16 = 3;

pub struct Header {
    pub status_message: String,
    /// Render the theme toggle (true when the sidebar is hidden).
    pub show_toggle: bool,
    pub theme: Theme,
    pub palette: Palette,
}

impl Header {
    pub fn new(status_message: String, show_toggle: bool, theme: Theme, palette: Palette) -> Self {
        Self {
            status_message,
            show_toggle,
            theme,
            palette,
        }
    }

    /// Where the toggle sits inside a header drawn at `area`.
    pub fn toggle_rect(area: Rect) -> Rect {
        let x = area.right().saturating_sub(TOGGLE_WIDTH + 1).max(area.x);
        Rect::new(x, area.y, TOGGLE_WIDTH.min(area.width), 1.min(area.height))
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::new()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(self.palette.border))
            .style(self.palette.panel_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let reserved = if self.show_toggle { TOGGLE_WIDTH + 2 } else { 1 };
        let text_width = inner.width.saturating_sub(reserved + 1) as usize;

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                TITLE,
                Style::default()
                    .fg(self.palette.heading)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if !self.status_message.is_empty() {
            let room = text_width.saturating_sub(TITLE.len() + 3);
            spans.push(Span::styled(
                format!(" · {}", truncate_to_width(&self.status_message, room)),
                Style::default()
                    .fg(self.palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);

        if self.show_toggle {
            let toggle = Paragraph::new(format!(" {} ", toggle_glyph(self.theme)))
                .style(Style::default().fg(self.palette.muted));
            frame.render_widget(toggle, Self::toggle_rect(inner));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(header: &mut Header, width: u16) -> String {
        let backend = TestBackend::new(width, HEADER_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                header.render(f, f.area());
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
    fn test_header_shows_title() {
        let mut header = Header::new(
            String::new(),
            false,
            Theme::Dark,
            Palette::for_theme(Theme::Dark),
        );
        let text = render_to_text(&mut header, 60);
        assert!(text.contains(TITLE));
        assert!(!text.contains('☀'));
    }

    #[test]
    fn test_header_shows_status() {
        let mut header = Header::new(
            "Waiting for reply…".to_string(),
            false,
            Theme::Dark,
            Palette::for_theme(Theme::Dark),
        );
        let text = render_to_text(&mut header, 60);
        assert!(text.contains("Waiting for reply"));
    }

    #[test]
    fn test_header_toggle_glyph_follows_theme() {
        let mut dark = Header::new(
            String::new(),
            true,
            Theme::Dark,
            Palette::for_theme(Theme::Dark),
        );
        assert!(render_to_text(&mut dark, 60).contains('☀'));

        let mut light = Header::new(
            String::new(),
            true,
            Theme::Light,
            Palette::for_theme(Theme::Light),
        );
        assert!(render_to_text(&mut light, 60).contains('☾'));
    }

    #[test]
    fn test_toggle_rect_hugs_right_edge() {
        let rect = Header::toggle_rect(Rect::new(10, 0, 50, 1));
        assert_eq!(rect, Rect::new(56, 0, 3, 1));
    }
}
