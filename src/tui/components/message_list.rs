//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display the list of messages
//! - Manage scrolling, including sticking to the bottom as replies land
//! - Hit testing support for hover highlighting
//! - Cache message heights between frames
//! - Show a typing indicator while simulated replies are pending
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice (props).
//!
//! Messages never change after they are appended, so a cached height stays
//! valid until the content width changes.
//!
//! ## Canvas Window
//!
//! Content positions are tracked in `u32`, but the scroll canvas is sized in
//! `u16`. When a conversation grows past `MAX_CANVAS_HEIGHT` rows, the canvas
//! covers only the newest rows and `canvas_top` records how many older rows
//! sit above it.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::{Message, Role};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Rows taken by the typing indicator under the last message.
const TYPING_INDICATOR_HEIGHT: u16 = 1;
const TYPING_FRAMES: [&str; 4] = ["·  ", "·· ", "···", " ··"];
/// Tallest scroll canvas the list will allocate.
pub const MAX_CANVAS_HEIGHT: u16 = u16::MAX;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Message currently under the mouse
    pub hovered_index: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Content rows cut off above the canvas (0 unless the canvas is capped)
    pub canvas_top: u32,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            hovered_index: None,
            viewport_height: 0,
            canvas_top: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        let total_content_height: u32 = self.layout.heights.iter().map(|&h| u32::from(h)).sum();
        canvas_height_for(total_content_height).saturating_sub(self.viewport_height)
    }

    /// Content row shown at the top of the viewport.
    pub fn content_offset(&self) -> u32 {
        self.canvas_top + u32::from(self.scroll_state.offset().y)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

fn canvas_height_for(content_height: u32) -> u16 {
    u16::try_from(content_height)
        .unwrap_or(u16::MAX)
        .min(MAX_CANVAS_HEIGHT)
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub palette: Palette,
    pub is_awaiting_reply: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        palette: Palette,
        is_awaiting_reply: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            palette,
            is_awaiting_reply,
            spinner_frame,
        }
    }

    fn typing_indicator(&self) -> Paragraph<'static> {
        let dots = TYPING_FRAMES[self.spinner_frame % TYPING_FRAMES.len()];
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(" ◆ ", self.palette.avatar_style(Role::Assistant)),
            Span::styled(format!(" {dots}"), Style::default().fg(self.palette.muted)),
        ]))
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let num_items = self.messages.len();

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(num_items, content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(MessageView::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(num_items, content_width);

        let total_height = self.state.layout.total_height();
        let indicator_height = if self.is_awaiting_reply {
            TYPING_INDICATOR_HEIGHT
        } else {
            0
        };
        let content_height = total_height.saturating_add(u32::from(indicator_height));
        let canvas_height = canvas_height_for(content_height);
        let canvas_top = content_height - u32::from(canvas_height);
        self.state.canvas_top = canvas_top;

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = if self.state.stick_to_bottom {
            canvas_height.saturating_sub(area.height)
        } else {
            self.state.scroll_state.offset().y
        };
        let visible_range = self
            .state
            .layout
            .visible_range(canvas_top + u32::from(scroll_offset), area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Block::new().style(self.palette.base()),
            Rect::new(0, 0, content_width, canvas_height),
        );

        let mut content_y: u32 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            // Messages starting above a capped canvas are not drawn
            if let Some(y) = content_y
                .checked_sub(canvas_top)
                .and_then(|y| u16::try_from(y).ok())
            {
                let is_hovered = self.state.hovered_index == Some(i);
                let view = MessageView::new(&self.messages[i], self.palette, is_hovered);
                let height = height.min(canvas_height.saturating_sub(y));
                scroll_view.render_widget(view, Rect::new(0, y, content_width, height));
            }
            content_y = content_y.saturating_add(u32::from(height));
        }

        if self.is_awaiting_reply {
            let y = canvas_height.saturating_sub(TYPING_INDICATOR_HEIGHT);
            scroll_view.render_widget(
                self.typing_indicator(),
                Rect::new(0, y, content_width, TYPING_INDICATOR_HEIGHT),
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on `MessageListState` because `MessageList` is rebuilt each
/// frame and cannot hold scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running sum of `heights`: the content row where each message ends
    pub prefix_heights: Vec<u32>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights can be kept for the next frame.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u32, |acc, &h| {
                *acc = acc.saturating_add(u32::from(h));
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Index range of messages intersecting the viewport, padded by half a
    /// viewport on each side.
    pub fn visible_range(&self, scroll_offset: u32, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = u32::from(viewport_height / 2);
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(u32::from(viewport_height))
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
