use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message, Role};
use crate::tui::palette::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Avatar glyph drawn in the message title.
fn avatar_glyph(role: Role) -> &'static str {
    match role {
        Role::Assistant => "◆",
        Role::User => "●",
    }
}

/// A stateless component that renders a single chat message.
///
/// `MessageView` is created fresh each frame. Hover state is tracked by the
/// parent `MessageList` and passed in.
///
/// # Styling
///
/// The title carries an avatar badge in the role colour (green for the
/// assistant, gray for the user) followed by the role label. A hovered message
/// gets the palette's hover background and an undimmed border.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options matching `Paragraph`'s wrapping so the list can
/// lay out its scroll canvas without rendering.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
    pub palette: Palette,
    pub is_hovered: bool,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message, palette: Palette, is_hovered: bool) -> Self {
        Self {
            message,
            palette,
            is_hovered,
        }
    }

    /// Calculate the height required for a message given a width.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still take one row.
            return 1;
        }

        let content = message.content().trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> Line<'static> {
        let role = self.message.role();
        Line::from(vec![
            Span::styled(
                format!(" {} ", avatar_glyph(role)),
                self.palette.avatar_style(role),
            ),
            Span::styled(
                format!(" {} ", role.label()),
                Style::default().fg(self.palette.muted),
            ),
        ])
    }
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let background = if self.is_hovered {
            self.palette.hover
        } else {
            self.palette.background
        };
        let border_style = if self.is_hovered {
            Style::default().fg(self.palette.muted)
        } else {
            Style::default()
                .fg(self.palette.border)
                .add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.title())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .style(Style::default().bg(background))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.content().trim())
            .style(Style::default().fg(self.palette.text).bg(background))
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}
