//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading** (request in flight): draws every ~80ms so the spinner
//!   animates smoothly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal
//!   resize.

mod event;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};
use tui_scrollview::ScrollViewState;

use crate::completion::{CompletionClient, OpenAiClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::history::{self, HistoryStore};
use crate::core::state::App;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub scroll_state: ScrollViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build the completion client from a resolved config.
pub fn build_client(config: &ResolvedConfig) -> Arc<dyn CompletionClient> {
    let api_key = config
        .api_key
        .clone()
        .expect("OpenAI API key must be set (config file or OPENAI_API_KEY env var)");
    Arc::new(OpenAiClient::new(api_key, Some(config.base_url.clone())))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = build_client(&config);
    info!(
        "Using {} client against {}",
        client.name(),
        config.base_url
    );
    let store = HistoryStore::open_default()?;
    let mut app = App::new(client, config.model_name.clone());
    let mut tui = TuiState::new();

    // Read the persisted history once at startup; absent or corrupt = empty.
    update(&mut app, Action::HistoryLoaded(store.load()));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from the background request task
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            let action = match event {
                TuiEvent::ForceQuit | TuiEvent::Quit => Some(Action::Quit),
                TuiEvent::Submit => Some(Action::Submit),
                TuiEvent::ResetHistory => Some(Action::ResetHistory),
                TuiEvent::InputChar(c) => {
                    let mut text = app.prompt.clone();
                    text.push(c);
                    Some(Action::EditPrompt(text))
                }
                TuiEvent::Paste(data) => {
                    let mut text = app.prompt.clone();
                    text.push_str(&data);
                    Some(Action::EditPrompt(text))
                }
                TuiEvent::Backspace => {
                    let mut text = app.prompt.clone();
                    text.pop();
                    Some(Action::EditPrompt(text))
                }
                TuiEvent::ScrollUp => {
                    tui.scroll_state.scroll_up();
                    None
                }
                TuiEvent::ScrollDown => {
                    tui.scroll_state.scroll_down();
                    None
                }
                TuiEvent::ScrollPageUp => {
                    tui.scroll_state.scroll_page_up();
                    None
                }
                TuiEvent::ScrollPageDown => {
                    tui.scroll_state.scroll_page_down();
                    None
                }
                TuiEvent::Resize => None,
            };

            if let Some(action) = action {
                match update(&mut app, action) {
                    Effect::Quit => should_quit = true,
                    Effect::SpawnRequest(prompt) => {
                        spawn_request(app.client.clone(), prompt, tx.clone());
                    }
                    Effect::PersistHistory => history::persist(&store, &app.history),
                    Effect::None => {}
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (request settlement)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::SpawnRequest(prompt) => {
                    spawn_request(app.client.clone(), prompt, tx.clone());
                }
                Effect::PersistHistory => history::persist(&store, &app.history),
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn spawn_request(client: Arc<dyn CompletionClient>, prompt: String, tx: mpsc::Sender<Action>) {
    info!("Spawning completion request");
    tokio::spawn(async move {
        let action = match client.complete(&prompt).await {
            Ok(completion) => Action::CompletionReceived { prompt, completion },
            Err(e) => Action::CompletionFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send completion result: receiver dropped");
        }
    });
}
