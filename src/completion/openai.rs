//! OpenAI legacy completions client.
//!
//! Talks to an engine-scoped completions endpoint
//! (`.../v1/engines/<engine>/completions`) with a JSON body and a bearer
//! credential. Only `choices[0].text` and `created` are consumed from the
//! response.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::completion::{Completion, CompletionClient, CompletionError};

// Fixed generation parameters, matching the reference behavior.
// Deliberately not user-configurable.
const TEMPERATURE: f32 = 0.5;
const MAX_TOKENS: u32 = 64;
const TOP_P: f32 = 1.0;
const FREQUENCY_PENALTY: f32 = 0.0;
const PRESENCE_PENALTY: f32 = 0.0;

/// Default engine-scoped base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/engines/text-curie-001";

// ============================================================================
// Completions API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct CompletionsRequest<'a> {
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Deserialize, Debug)]
struct CompletionsResponse {
    created: i64,
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    text: String,
}

// ============================================================================
// Client Implementation
// ============================================================================

pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, CompletionError> {
        let request = CompletionsRequest {
            prompt,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        };

        info!(
            "Completions request: {} bytes of prompt, max_tokens={}",
            prompt.len(),
            MAX_TOKENS
        );

        let response = self
            .client
            .post(format!("{}/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        debug!("Completions response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Completions API error: {} - {}", status, err_body);
            return Err(CompletionError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let parsed: CompletionsResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Parse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Parse("response contained no choices".to_string()))?;

        debug!(
            "Completion received: {} bytes, created={}",
            choice.text.len(),
            parsed.created
        );

        Ok(Completion {
            text: choice.text,
            created: parsed.created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_carries_fixed_parameters() {
        let request = CompletionsRequest {
            prompt: "What is 2+2?",
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(json["prompt"], "What is 2+2?");
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["max_tokens"], 64);
        assert_eq!(json["top_p"], 1.0);
        assert_eq!(json["frequency_penalty"], 0.0);
        assert_eq!(json["presence_penalty"], 0.0);
    }

    #[test]
    fn test_client_name() {
        let client = OpenAiClient::new("test-key".to_string(), None);
        assert_eq!(client.name(), "openai");
    }

    #[test]
    fn test_response_parses_expected_shape() {
        let body = r#"{"id":"cmpl-1","created":1700000000,"choices":[{"text":" 4","index":0}]}"#;
        let parsed: CompletionsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.created, 1700000000);
        assert_eq!(parsed.choices[0].text, " 4");
    }
}
