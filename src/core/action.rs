//! # Actions
//!
//! Everything that can happen in askai becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! API responds? That's `Action::CompletionReceived { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the I/O the caller must perform.
//! No side effects happen here, so every transition is testable without a
//! rendered view or a network.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The loading flag is cleared on every settlement path — success and
//! failure — so a failed request can never leave the submit control stuck.

use log::{debug, info};

use crate::completion::Completion;
use crate::core::history::Exchange;
use crate::core::state::App;

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the form prompt with the given text.
    EditPrompt(String),
    /// Submit the current prompt. Ignored while a request is in flight
    /// or when the prompt is empty.
    Submit,
    /// The completion client resolved. Carries the prompt that was
    /// submitted so the exchange records what was actually sent.
    CompletionReceived { prompt: String, completion: Completion },
    /// The completion client failed (network, HTTP status, or parse).
    CompletionFailed(String),
    /// Replace the in-memory history (startup load from the store).
    HistoryLoaded(Vec<Exchange>),
    /// Clear the history and the persisted value.
    ResetHistory,
    Quit,
}

/// I/O the event loop must perform after a state transition.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Dispatch a completion request for the given prompt.
    SpawnRequest(String),
    /// The history changed; serialize and overwrite the store.
    PersistHistory,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::EditPrompt(text) => {
            app.prompt = text;
            // A fresh edit clears the previous failure message.
            app.error = None;
            Effect::None
        }
        Action::Submit => {
            if app.is_loading {
                debug!("Submit ignored: request already in flight");
                return Effect::None;
            }
            if app.prompt.trim().is_empty() {
                debug!("Submit ignored: empty prompt");
                return Effect::None;
            }
            app.is_loading = true;
            app.error = None;
            app.status_message = String::from("Fetching response...");
            Effect::SpawnRequest(app.prompt.clone())
        }
        Action::CompletionReceived { prompt, completion } => {
            info!("Completion received ({} bytes)", completion.text.len());
            app.history.insert(
                0,
                Exchange {
                    user_prompt: prompt,
                    prompt_response: completion.text,
                    created: completion.created,
                },
            );
            app.prompt.clear();
            app.is_loading = false;
            app.error = None;
            app.status_message = String::from("Response received.");
            Effect::PersistHistory
        }
        Action::CompletionFailed(message) => {
            info!("Completion failed: {}", message);
            app.is_loading = false;
            app.error = Some(message);
            app.status_message = String::from("Request failed.");
            Effect::None
        }
        Action::HistoryLoaded(history) => {
            debug!("History loaded ({} exchanges)", history.len());
            app.history = history;
            Effect::None
        }
        Action::ResetHistory => {
            if app.history.is_empty() {
                return Effect::None;
            }
            app.history.clear();
            app.status_message = String::from("History cleared.");
            Effect::PersistHistory
        }
        Action::Quit => Effect::Quit,
    }
}
