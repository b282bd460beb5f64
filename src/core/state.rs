//! # Application State
//!
//! Core business state for askai. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── client: Arc<dyn CompletionClient>  // completion API client
//! ├── history: Vec<Exchange>     // past exchanges, most-recent-first
//! ├── prompt: String             // current form input
//! ├── is_loading: bool           // waiting for API
//! ├── error: Option<String>      // error message from the last request
//! ├── status_message: String     // status bar text
//! └── model_name: String         // engine shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::completion::CompletionClient;
use crate::core::history::Exchange;

pub struct App {
    pub client: Arc<dyn CompletionClient>,
    /// Past exchanges, most-recent-first. Grows on success, cleared by reset.
    pub history: Vec<Exchange>,
    pub prompt: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub status_message: String,
    pub model_name: String,
}

impl App {
    pub fn new(client: Arc<dyn CompletionClient>, model_name: String) -> Self {
        Self {
            client,
            history: Vec::new(),
            prompt: String::new(),
            is_loading: false,
            error: None,
            status_message: String::from("Ask a question or for an opinion about something..."),
            model_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.history.is_empty());
        assert!(app.prompt.is_empty());
        assert!(!app.is_loading);
        assert!(app.error.is_none());
        assert_eq!(app.model_name, "test-model");
    }
}
