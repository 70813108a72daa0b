//! Frame layout, top-level drawing, and mouse hit testing.
//!
//! `compute_layout` is the single source of truth for where each region
//! sits. Drawing and hit testing both call it so a click always lands on
//! what was drawn.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::ChatSurface;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::header::HEADER_HEIGHT;
use crate::tui::components::sidebar::{SIDEBAR_BREAKPOINT, SIDEBAR_WIDTH};
use crate::tui::components::{Header, InputBox, MessageList, Sidebar};
use crate::tui::palette::Palette;

/// Widest the message column, input and footer may grow.
pub const MAX_COLUMN_WIDTH: u16 = 96;
const FOOTER_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLayout {
    /// `None` when the terminal is narrower than the sidebar breakpoint.
    pub sidebar: Option<Rect>,
    pub header: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub footer: Rect,
}

/// Clickable controls on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    ThemeToggle,
    Send,
}

pub fn compute_layout(frame_area: Rect, input_box: &InputBox) -> SurfaceLayout {
    use Constraint::{Length, Min};

    let (sidebar, main) = if frame_area.width >= SIDEBAR_BREAKPOINT {
        let [sidebar, main] = Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(frame_area);
        (Some(sidebar), main)
    } else {
        (None, frame_area)
    };

    let input_height = input_box.calculate_height(main.width.min(MAX_COLUMN_WIDTH));
    let [header, body, input, footer] = Layout::vertical([
        Length(HEADER_HEIGHT),
        Min(0),
        Length(input_height),
        Length(FOOTER_HEIGHT),
    ])
    .areas(main);

    SurfaceLayout {
        sidebar,
        header,
        messages: centered_column(body),
        input: centered_column(input),
        footer: centered_column(footer),
    }
}

fn centered_column(area: Rect) -> Rect {
    let width = area.width.min(MAX_COLUMN_WIDTH);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

pub fn draw_ui(frame: &mut Frame, surface: &ChatSurface, tui: &mut TuiState, spinner_frame: usize) {
    let palette = Palette::for_theme(surface.theme);
    tui.input_box.palette = palette;

    frame.render_widget(Block::new().style(palette.base()), frame.area());
    let layout = compute_layout(frame.area(), &tui.input_box);

    if let Some(sidebar_area) = layout.sidebar {
        Sidebar::new(&surface.user_name, surface.theme, palette)
            .new_chat_hovered(tui.new_chat_hovered)
            .render(frame, sidebar_area);
    }

    Header::new(
        surface.status_message(),
        layout.sidebar.is_none(),
        surface.theme,
        palette,
    )
    .render(frame, layout.header);

    MessageList::new(
        &mut tui.message_list,
        surface.conversation.messages(),
        palette,
        surface.is_awaiting_reply(),
        spinner_frame,
    )
    .render(frame, layout.messages);

    tui.input_box.render(frame, layout.input);

    let footer = Paragraph::new(surface.footer.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.faint));
    frame.render_widget(footer, layout.footer);
}

/// Which control, if any, sits under a screen position.
pub fn hit_test_control(column: u16, row: u16, layout: &SurfaceLayout) -> Option<Control> {
    let pos = Position::new(column, row);

    let toggle = match layout.sidebar {
        Some(sidebar) => Sidebar::toggle_rect(sidebar),
        None => Header::toggle_rect(layout.header),
    };
    if toggle.contains(pos) {
        return Some(Control::ThemeToggle);
    }
    if InputBox::send_button_rect(layout.input).contains(pos) {
        return Some(Control::Send);
    }
    None
}

/// Whether a screen position is over the sidebar's "New Chat" row.
pub fn hit_test_new_chat(column: u16, row: u16, layout: &SurfaceLayout) -> bool {
    layout
        .sidebar
        .is_some_and(|sidebar| Sidebar::new_chat_rect(sidebar).contains(Position::new(column, row)))
}

/// Which message index, if any, sits under a screen position.
///
/// `content_offset` is the content row at the top of the message viewport.
pub fn hit_test_message(
    column: u16,
    row: u16,
    layout: &SurfaceLayout,
    content_offset: u32,
    prefix_heights: &[u32],
) -> Option<usize> {
    let area = layout.messages;
    if !area.contains(Position::new(column, row)) {
        return None;
    }

    let content_y = content_offset.saturating_add(u32::from(row - area.y));
    let index = prefix_heights.partition_point(|&end| end <= content_y);
    (index < prefix_heights.len()).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw_text(surface: &ChatSurface, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut tui = TuiState::new(Palette::for_theme(surface.theme));
        terminal
            .draw(|f| draw_ui(f, surface, &mut tui, 0))
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
    fn test_draw_wide_shows_sidebar() {
        let surface = ChatSurface::new();
        let text = draw_text(&surface, 140, 30);
        assert!(text.contains("New Chat"));
        assert!(text.contains("Guest"));
        assert!(text.contains("AI Chat Assistant"));
        assert!(text.contains("Hello! I am your AI assistant."));
        assert!(text.contains("Type your message..."));
        assert!(text.contains("AI Assistant"));
    }

    #[test]
    fn test_draw_configured_credit_line_and_user() {
        use crate::core::config::{CliOverrides, ParleyConfig, resolve_with_env};

        let mut file = ParleyConfig::default();
        file.general.footer = Some("AI Assistant by Ada Lovelace".to_string());
        file.general.user_name = Some("Ada Lovelace".to_string());
        let resolved = resolve_with_env(&file, CliOverrides::default(), |_| None);

        let surface = ChatSurface::from_config(&resolved);
        let text = draw_text(&surface, 140, 30);
        assert!(text.contains("AI Assistant by Ada Lovelace"));
        assert!(text.contains("Ada Lovelace"));
        assert!(!text.contains("Guest"));
    }

    #[test]
    fn test_draw_narrow_hides_sidebar() {
        let surface = ChatSurface::new();
        let text = draw_text(&surface, 80, 24);
        assert!(!text.contains("New Chat"));
        // Toggle moves into the header
        assert!(text.contains('☀'));
    }

    #[test]
    fn test_draw_light_theme_background() {
        let mut surface = ChatSurface::new();
        surface.toggle_theme();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut tui = TuiState::new(Palette::for_theme(surface.theme));
        terminal
            .draw(|f| draw_ui(f, &surface, &mut tui, 0))
            .unwrap();

        let light = Palette::for_theme(Theme::Light);
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].bg, light.panel);
        assert_eq!(tui.input_box.palette, light);
    }

    #[test]
    fn test_layout_breakpoint() {
        let input = InputBox::new(Palette::for_theme(Theme::Dark));

        let wide = compute_layout(Rect::new(0, 0, 140, 30), &input);
        assert_eq!(wide.sidebar, Some(Rect::new(0, 0, SIDEBAR_WIDTH, 30)));
        assert_eq!(wide.messages.width, MAX_COLUMN_WIDTH);
        // 140 - 32 = 108 wide main area; column is centred inside it
        assert_eq!(wide.messages.x, SIDEBAR_WIDTH + (108 - MAX_COLUMN_WIDTH) / 2);

        let narrow = compute_layout(Rect::new(0, 0, 80, 24), &input);
        assert_eq!(narrow.sidebar, None);
        assert_eq!(narrow.header, Rect::new(0, 0, 80, HEADER_HEIGHT));
        assert_eq!(narrow.input, Rect::new(0, 20, 80, 3));
        assert_eq!(narrow.footer, Rect::new(0, 23, 80, 1));
        assert_eq!(narrow.messages, Rect::new(0, 2, 80, 18));
    }

    #[test]
    fn test_hit_test_controls() {
        let input = InputBox::new(Palette::for_theme(Theme::Dark));

        let narrow = compute_layout(Rect::new(0, 0, 80, 24), &input);
        let toggle = Header::toggle_rect(narrow.header);
        assert_eq!(
            hit_test_control(toggle.x, toggle.y, &narrow),
            Some(Control::ThemeToggle)
        );
        let send = InputBox::send_button_rect(narrow.input);
        assert_eq!(
            hit_test_control(send.x + 1, send.y, &narrow),
            Some(Control::Send)
        );
        assert_eq!(hit_test_control(5, 10, &narrow), None);

        let wide = compute_layout(Rect::new(0, 0, 140, 30), &input);
        let toggle = Sidebar::toggle_rect(wide.sidebar.unwrap());
        assert_eq!(
            hit_test_control(toggle.x + 2, toggle.y, &wide),
            Some(Control::ThemeToggle)
        );
        // The header has no toggle while the sidebar is visible
        let header_toggle = Header::toggle_rect(wide.header);
        assert_eq!(
            hit_test_control(header_toggle.x, header_toggle.y, &wide),
            None
        );
    }

    #[test]
    fn test_hit_test_new_chat() {
        let input = InputBox::new(Palette::for_theme(Theme::Dark));

        let wide = compute_layout(Rect::new(0, 0, 140, 30), &input);
        let row = Sidebar::new_chat_rect(wide.sidebar.unwrap());
        assert!(hit_test_new_chat(row.x + 4, row.y, &wide));
        assert!(!hit_test_new_chat(row.x + 4, row.y + 1, &wide));

        // No sidebar, nothing to hover
        let narrow = compute_layout(Rect::new(0, 0, 80, 24), &input);
        assert!(!hit_test_new_chat(row.x + 4, row.y, &narrow));
    }

    #[test]
    fn test_hit_test_message() {
        let input = InputBox::new(Palette::for_theme(Theme::Dark));
        let layout = compute_layout(Rect::new(0, 0, 80, 24), &input);
        let prefix = [3, 6];

        // Messages start at row 2
        assert_eq!(hit_test_message(10, 2, &layout, 0, &prefix), Some(0));
        assert_eq!(hit_test_message(10, 4, &layout, 0, &prefix), Some(0));
        assert_eq!(hit_test_message(10, 5, &layout, 0, &prefix), Some(1));
        assert_eq!(hit_test_message(10, 9, &layout, 0, &prefix), None);
        // Scrolled by 3 rows: top row now shows message 1
        assert_eq!(hit_test_message(10, 2, &layout, 3, &prefix), Some(1));
        // Header row is outside the list
        assert_eq!(hit_test_message(10, 0, &layout, 0, &prefix), None);
    }

    #[test]
    fn test_hit_test_message_far_down_a_long_conversation() {
        let input = InputBox::new(Palette::for_theme(Theme::Dark));
        let layout = compute_layout(Rect::new(0, 0, 80, 24), &input);
        let prefix = [65_535, 131_070, 131_073];

        assert_eq!(hit_test_message(10, 2, &layout, 131_070, &prefix), Some(2));
        assert_eq!(hit_test_message(10, 3, &layout, 131_069, &prefix), Some(2));
        assert_eq!(hit_test_message(10, 2, &layout, 131_069, &prefix), Some(1));
    }
}
