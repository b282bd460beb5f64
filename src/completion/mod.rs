pub mod client;
pub mod openai;

pub use client::{Completion, CompletionClient, CompletionError};
pub use openai::{DEFAULT_BASE_URL, OpenAiClient};
