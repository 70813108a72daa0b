//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the surface,
//! translates terminal events into core `Action` values, and owns the reply
//! timers the core asks for.
//!
//! This is the only module that knows about ratatui, crossterm and tokio.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (a reply is pending): draws every ~80ms so the typing
//!   indicator moves.
//! - **Idle**: sleeps up to 500ms and only redraws on events, resizes, or
//!   arriving replies.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use tokio::task::JoinHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::ChatSurface;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::palette::Palette;
use crate::tui::ui::Control;

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Mouse is over the sidebar's "New Chat" row
    pub new_chat_hovered: bool,
}

impl TuiState {
    pub fn new(palette: Palette) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(palette),
            new_chat_hovered: false,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Keyboard enhancement lets Esc arrive without the legacy timeout.
        // Terminals without the protocol ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Run the chat surface until the user quits.
///
/// Must be called from inside a tokio runtime; reply timers are spawned on it.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut surface = ChatSurface::from_config(&config);
    let mut tui = TuiState::new(Palette::for_theme(surface.theme));

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    let mut reply_tasks: Vec<JoinHandle<()>> = Vec::new();
    let result = event_loop(&mut terminal, &mut surface, &mut tui, &mut reply_tasks);

    // Timers still running belong to a surface that no longer exists.
    if !reply_tasks.is_empty() {
        info!("Aborting {} pending reply timer(s)", reply_tasks.len());
    }
    for task in reply_tasks.drain(..) {
        task.abort();
    }

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Chat surface closed ({} messages)", surface.conversation.len());
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    surface: &mut ChatSurface,
    tui: &mut TuiState,
    reply_tasks: &mut Vec<JoinHandle<()>>,
) -> std::io::Result<()> {
    // Channel for actions from reply timers
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = surface.is_awaiting_reply();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 6.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, surface, tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = dispatch_event(surface, tui, &event, frame_area);
            if apply_effect(effect, &tx, reply_tasks) {
                return Ok(());
            }
        }

        // Replies from timers that have fired
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(surface, action);
            if apply_effect(effect, &tx, reply_tasks) {
                return Ok(());
            }
        }

        reply_tasks.retain(|task| !task.is_finished());
    }
}

/// Perform the I/O an effect asks for. Returns true when the loop should exit.
fn apply_effect(
    effect: Effect,
    tx: &mpsc::Sender<Action>,
    reply_tasks: &mut Vec<JoinHandle<()>>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::ScheduleReply(delay) => {
            reply_tasks.push(spawn_simulated_reply(delay, tx.clone()));
            false
        }
        Effect::Quit => true,
    }
}

/// Start a one-shot timer that sends `Action::SimulatedReply` after `delay`.
///
/// Each submission gets its own timer; timers never cancel one another.
pub fn spawn_simulated_reply(delay: Duration, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    debug!("Scheduling simulated reply in {}ms", delay.as_millis());
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(Action::SimulatedReply).is_err() {
            warn!("Failed to deliver simulated reply: receiver dropped");
        }
    })
}

/// Route one terminal event to the components and the core.
pub fn dispatch_event(
    surface: &mut ChatSurface,
    tui: &mut TuiState,
    event: &TuiEvent,
    frame_area: Rect,
) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::Quit => update(surface, Action::Quit),
        TuiEvent::ToggleTheme => update(surface, Action::ToggleTheme),

        TuiEvent::MouseMove(column, row) => {
            let layout = ui::compute_layout(frame_area, &tui.input_box);
            tui.new_chat_hovered = ui::hit_test_new_chat(*column, *row, &layout);
            tui.message_list.hovered_index = ui::hit_test_message(
                *column,
                *row,
                &layout,
                tui.message_list.content_offset(),
                &tui.message_list.layout.prefix_heights,
            );
            Effect::None
        }

        TuiEvent::MouseClick(column, row) => {
            let layout = ui::compute_layout(frame_area, &tui.input_box);
            match ui::hit_test_control(*column, *row, &layout) {
                Some(Control::ThemeToggle) => update(surface, Action::ToggleTheme),
                Some(Control::Send) => submit_draft(surface, tui),
                None => Effect::None,
            }
        }

        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            Effect::None
        }

        _ => match tui.input_box.handle_event(event) {
            Some(InputEvent::Submit) => submit_draft(surface, tui),
            Some(InputEvent::ContentChanged) => {
                update(surface, Action::SetDraft(tui.input_box.buffer.clone()))
            }
            Some(InputEvent::CursorMoved) | None => Effect::None,
        },
    }
}

fn submit_draft(surface: &mut ChatSurface, tui: &mut TuiState) -> Effect {
    let effect = update(surface, Action::Submit);
    tui.input_box.sync_draft(surface.conversation.draft());
    if matches!(effect, Effect::ScheduleReply(_)) {
        tui.message_list.stick_to_bottom = true;
    }
    effect
}
