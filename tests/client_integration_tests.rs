use askai::completion::{CompletionClient, CompletionError, OpenAiClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_successful_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id":"cmpl-1","created":1700000000,"choices":[{"text":" 4","index":0}]}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new("test-key".to_string(), Some(mock_server.uri()));
    let completion = client.complete("What is 2+2?").await.unwrap();

    assert_eq!(completion.text, " 4");
    assert_eq!(completion.created, 1700000000);
}

#[tokio::test]
async fn test_request_carries_prompt_and_fixed_parameters() {
    let mock_server = MockServer::start().await;

    // Only matches if the body carries the prompt and the fixed generation
    // parameters; an unmatched request would 404 and fail the call.
    Mock::given(method("POST"))
        .and(path("/completions"))
        .and(body_partial_json(serde_json::json!({
            "prompt": "What is 2+2?",
            "temperature": 0.5,
            "max_tokens": 64,
            "top_p": 1.0,
            "frequency_penalty": 0.0,
            "presence_penalty": 0.0,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"created":1,"choices":[{"text":"ok"}]}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new("test-key".to_string(), Some(mock_server.uri()));
    let result = client.complete("What is 2+2?").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_api_error_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new("invalid-key".to_string(), Some(mock_server.uri()));
    let result = client.complete("hello").await;

    assert!(matches!(result, Err(CompletionError::Api { status: 401, .. })));
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not-json"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new("test-key".to_string(), Some(mock_server.uri()));
    let result = client.complete("hello").await;

    assert!(matches!(result, Err(CompletionError::Parse(_))));
}

#[tokio::test]
async fn test_missing_choices_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"created":1700000000,"choices":[]}"#),
        )
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new("test-key".to_string(), Some(mock_server.uri()));
    let result = client.complete("hello").await;

    assert!(matches!(result, Err(CompletionError::Parse(_))));
}

#[tokio::test]
async fn test_missing_created_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"choices":[{"text":"hi"}]}"#),
        )
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new("test-key".to_string(), Some(mock_server.uri()));
    let result = client.complete("hello").await;

    assert!(matches!(result, Err(CompletionError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_network_error() {
    // Nothing listens on the discard port.
    let client = OpenAiClient::new(
        "test-key".to_string(),
        Some("http://127.0.0.1:9".to_string()),
    );
    let result = client.complete("hello").await;

    assert!(matches!(result, Err(CompletionError::Network(_))));
}
