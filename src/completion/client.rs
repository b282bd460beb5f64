use std::fmt;

use async_trait::async_trait;

/// The consumed portion of a completion response: the first generated
/// text and the server-reported creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    /// Unix timestamp reported by the server.
    pub created: i64,
}

/// Errors that can occur while fetching a completion.
/// Every call site must handle these before touching the loading flag.
#[derive(Debug)]
pub enum CompletionError {
    /// Client misconfigured (missing API key, bad URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// The response body was missing the expected fields.
    Parse(String),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Config(msg) => write!(f, "config error: {msg}"),
            CompletionError::Network(msg) => write!(f, "network error: {msg}"),
            CompletionError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            CompletionError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CompletionError {}

/// A client for a text-completion endpoint. One request/response cycle per
/// call — no retry, no streaming.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the name of the client.
    fn name(&self) -> &str;

    /// Fetches a single completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<Completion, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompletionError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 401): Unauthorized");

        let err = CompletionError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
