//! # Sidebar Component
//!
//! Left panel shown on wide terminals: a "New Chat" entry at the top, and
//! the user's name with the theme toggle at the bottom.
//!
//! The "New Chat" entry is decoration only. There is a single conversation
//! per run, so it has no action attached. It still highlights under the
//! mouse.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::components::truncate_to_width;
use crate::tui::palette::{Palette, toggle_glyph};

pub const SIDEBAR_WIDTH: u16 = 32;
/// Terminals narrower than this hide the sidebar.
pub const SIDEBAR_BREAKPOINT: u16 = 100;
const TOGGLE_WIDTH: u16 = 3;

pub struct Sidebar<'a> {
    pub user_name: &'a str,
    pub theme: Theme,
    pub palette: Palette,
    pub new_chat_hovered: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(user_name: &'a str, theme: Theme, palette: Palette) -> Self {
        Self {
            user_name,
            theme,
            palette,
            new_chat_hovered: false,
        }
    }

    pub fn new_chat_hovered(mut self, hovered: bool) -> Self {
        self.new_chat_hovered = hovered;
        self
    }

    fn block(palette: Palette) -> Block<'static> {
        Block::new()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(palette.border))
            .style(palette.panel_style())
            .padding(Padding::uniform(1))
    }

    /// Rows: [new chat, spacer, divider, user row]
    fn rows(area: Rect) -> [Rect; 4] {
        let inner = Self::block(Palette::for_theme(Theme::Dark)).inner(area);
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner)
    }

    /// The "New Chat" row inside a sidebar drawn at `area`.
    pub fn new_chat_rect(area: Rect) -> Rect {
        let [new_chat_row, ..] = Self::rows(area);
        new_chat_row
    }

    /// Where the theme toggle sits inside a sidebar drawn at `area`.
    pub fn toggle_rect(area: Rect) -> Rect {
        let [_, _, _, user_row] = Self::rows(area);
        let x = user_row.right().saturating_sub(TOGGLE_WIDTH).max(user_row.x);
        Rect::new(x, user_row.y, TOGGLE_WIDTH.min(user_row.width), user_row.height)
    }
}

impl<'a> Component for Sidebar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Self::block(self.palette), area);
        let [new_chat_row, _, divider_row, user_row] = Self::rows(area);

        let new_chat = Line::from(vec![
            Span::styled(" ▣ ", Style::default().fg(self.palette.muted)),
            Span::styled("New Chat", Style::default().fg(self.palette.heading)),
        ]);
        let row_style = if self.new_chat_hovered {
            Style::default().bg(self.palette.hover)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(new_chat).style(row_style), new_chat_row);

        let divider = "─".repeat(divider_row.width as usize);
        frame.render_widget(
            Paragraph::new(divider).style(Style::default().fg(self.palette.border)),
            divider_row,
        );

        let name_width = user_row.width.saturating_sub(TOGGLE_WIDTH + 1) as usize;
        let name = Paragraph::new(format!(
            " {}",
            truncate_to_width(self.user_name, name_width.saturating_sub(1))
        ))
        .style(Style::default().fg(self.palette.muted));
        frame.render_widget(name, user_row);

        let toggle = Paragraph::new(format!(" {} ", toggle_glyph(self.theme)))
            .style(Style::default().fg(self.palette.muted));
        frame.render_widget(toggle, Self::toggle_rect(area));
    }
}
