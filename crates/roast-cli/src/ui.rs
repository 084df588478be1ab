//! TUI implementation for roast

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use roast_core::{ChatEvent, ExchangeController, ExchangeHandle, Message, TranscriptStore};
use roast_tui::{
    App, Theme,
    input::{Action, Edit, Scroll, event_to_action},
    widgets::{Header, InputBox, MessageList, Spinner, message_list::calculate_message_height},
};
use std::io;
use std::time::Instant;

/// Placeholder shown in the empty input box
const INPUT_PLACEHOLDER: &str = "Drop your hottest football take...";
/// Label next to the spinner while a reply is pending
const TYPING_LABEL: &str = "Pundit is typing...";
/// Key hints shown while idle
const KEY_HINTS: &str = "Enter: send │ PgUp/PgDn: scroll │ Ctrl+C: quit";
/// Lines moved per mouse wheel notch
const WHEEL_STEP: usize = 3;

/// What the event loop should do after an input action
#[derive(Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
    Submit(String),
}

/// Exchange waiting to be started by the event loop
enum Queued {
    Greeting,
    Submit(String),
}

/// TUI application state
struct TuiState {
    /// Mirror of the transcript, fed by chat events
    messages: Vec<Message>,
    /// Input box
    input: InputBox,
    /// Current scroll position (`usize::MAX` pins to the bottom)
    scroll: usize,
    /// Height of the transcript pane at the last render
    viewport_height: usize,
    /// Whether an exchange is in flight
    handle: ExchangeHandle,
    /// Spinner start time for animation
    spinner_start: Instant,
    theme: Theme,
}

impl TuiState {
    fn new(theme: Theme, handle: ExchangeHandle) -> Self {
        let mut input = InputBox::new().with_placeholder(INPUT_PLACEHOLDER);
        input.set_focused(true);
        Self {
            messages: Vec::new(),
            input,
            scroll: 0,
            viewport_height: 0,
            handle,
            spinner_start: Instant::now(),
            theme,
        }
    }

    fn is_pending(&self) -> bool {
        self.handle.is_pending()
    }

    fn handle_chat_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::MessageAppended { message, .. } => {
                self.messages.push(message);
                self.scroll_to_bottom();
            }
            ChatEvent::PendingChanged { pending } => {
                if pending {
                    self.spinner_start = Instant::now();
                    self.scroll_to_bottom();
                }
            }
        }
    }

    fn scroll_to_bottom(&mut self) {
        // Resolved during render once the content height is known
        self.scroll = usize::MAX;
    }

    fn scroll_by(&mut self, scroll: Scroll) {
        let page = self.viewport_height.max(1);
        self.scroll = match scroll {
            Scroll::LineUp => self.scroll.saturating_sub(1),
            Scroll::LineDown => self.scroll.saturating_add(1),
            Scroll::PageUp => self.scroll.saturating_sub(page),
            Scroll::PageDown => self.scroll.saturating_add(page),
            Scroll::WheelUp => self.scroll.saturating_sub(WHEEL_STEP),
            Scroll::WheelDown => self.scroll.saturating_add(WHEEL_STEP),
        };
    }

    fn handle_action(&mut self, action: Action, width: u16) -> Control {
        match action {
            Action::Quit => Control::Quit,
            Action::Submit => {
                if self.is_pending() || self.input.content().trim().is_empty() {
                    Control::Continue
                } else {
                    Control::Submit(self.input.take())
                }
            }
            Action::Scroll(scroll) => {
                self.scroll_by(scroll);
                Control::Continue
            }
            Action::Edit(edit) => {
                self.input.apply(&edit, width);
                Control::Continue
            }
            Action::Ignored => Control::Continue,
        }
    }

    fn handle_terminal_event(&mut self, event: Option<io::Result<Event>>, width: u16) -> Control {
        match event {
            Some(Ok(evt)) => match event_to_action(evt) {
                Some(action) => self.handle_action(action, width),
                None => Control::Continue,
            },
            Some(Err(e)) => {
                tracing::warn!(error = %e, "terminal event stream failed");
                Control::Quit
            }
            None => Control::Quit,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Header::HEIGHT),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(Header::new(&self.theme), chunks[0]);
        self.render_messages(frame, chunks[1]);
        self.render_status(frame, chunks[2]);

        self.input.set_disabled(self.is_pending());
        self.input.render(chunks[3], frame.buffer_mut(), &self.theme);
    }

    fn render_messages(&mut self, frame: &mut Frame, area: Rect) {
        self.viewport_height = area.height as usize;

        let content_height = calculate_message_height(&self.messages, area.width as usize);
        let max_scroll = content_height.saturating_sub(area.height as usize);
        self.scroll = self.scroll.min(max_scroll);

        let message_list = MessageList::new(&self.messages, &self.theme).scroll(self.scroll);
        frame.render_widget(message_list, area);

        // Render scrollbar if content overflows
        if content_height > area.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .style(self.theme.border_style());

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll);

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if self.is_pending() {
            let spinner =
                Spinner::new(TYPING_LABEL, &self.theme).with_start_time(self.spinner_start);
            frame.render_widget(spinner, area);
        } else {
            let hints = Line::from(Span::styled(KEY_HINTS, self.theme.dim_style())).right_aligned();
            frame.render_widget(Paragraph::new(hints), area);
        }
    }
}

/// Run the TUI application
pub async fn run_tui(controller: &ExchangeController) -> anyhow::Result<()> {
    let mut app = App::new()?;
    let mut state = TuiState::new(app.theme().clone(), controller.handle());

    let mut store = TranscriptStore::new();
    let mut chat_rx = store.subscribe();

    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(app.tick_rate());

    // The greeting runs as soon as the screen is up
    let mut queued = Some(Queued::Greeting);

    loop {
        if let Some(next) = queued.take() {
            let store_ref = &mut store;
            let mut exchange = std::pin::pin!(async move {
                match next {
                    Queued::Greeting => controller.greet(store_ref).await,
                    Queued::Submit(text) => controller.submit(store_ref, &text).await,
                }
            });

            // Poll the exchange alongside input until it settles
            loop {
                app.draw(|frame| state.render(frame))?;
                let width = app.width()?;

                tokio::select! {
                    biased;

                    status = &mut exchange => {
                        tracing::debug!(?status, "exchange settled");
                        break;
                    }

                    event = chat_rx.recv() => {
                        if let Ok(chat_event) = event {
                            state.handle_chat_event(chat_event);
                        }
                    }

                    // Typing still works while pending; Enter is refused
                    event = event_stream.next() => {
                        if state.handle_terminal_event(event, width) == Control::Quit {
                            return Ok(());
                        }
                    }

                    // Tick for the spinner
                    _ = tick_interval.tick() => {}
                }
            }

            // Drain events emitted as the exchange finished
            while let Ok(chat_event) = chat_rx.try_recv() {
                state.handle_chat_event(chat_event);
            }
            continue;
        }

        app.draw(|frame| state.render(frame))?;
        let width = app.width()?;

        tokio::select! {
            biased;

            event = chat_rx.recv() => {
                if let Ok(chat_event) = event {
                    state.handle_chat_event(chat_event);
                }
            }

            event = event_stream.next() => {
                match state.handle_terminal_event(event, width) {
                    Control::Quit => break,
                    Control::Submit(text) => queued = Some(Queued::Submit(text)),
                    Control::Continue => {}
                }
            }
        }
    }

    Ok(())
}
