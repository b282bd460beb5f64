//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::completion::{Completion, CompletionClient, CompletionError};

/// A stub client returning a canned completion, for tests that don't need
/// real API calls.
pub struct StubClient {
    pub completion: Option<Completion>,
}

impl StubClient {
    /// A stub that always succeeds with the given text and timestamp.
    pub fn succeeding(text: &str, created: i64) -> Self {
        Self {
            completion: Some(Completion {
                text: text.to_string(),
                created,
            }),
        }
    }

    /// A stub that always fails with a simulated network error.
    pub fn failing() -> Self {
        Self { completion: None }
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, _prompt: &str) -> Result<Completion, CompletionError> {
        match &self.completion {
            Some(completion) => Ok(completion.clone()),
            None => Err(CompletionError::Network("simulated failure".to_string())),
        }
    }
}

/// Creates a test App with a succeeding StubClient.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(StubClient::succeeding(" 4", 1700000000)),
        "test-model".to_string(),
    )
}
