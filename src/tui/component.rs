use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the chat surface that draws itself into a `Rect`.
///
/// Data comes in as props (struct fields, including the current `Palette`).
/// Persistent presentation state, such as scroll offsets, is held behind a
/// `&mut` field so `render` can update caches during the draw pass, the same
/// way ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal input.
pub trait EventHandler {
    /// The high-level event this component emits to the event loop.
    type Event;

    /// Handle a `TuiEvent`, returning a high-level event if something happened.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
