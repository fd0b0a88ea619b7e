use daytrip_core::completion::{
    CompletionClient, CompletionClientFactory, CompletionError, CompletionRequest,
};
use daytrip_core::config::ModelConfig;
use daytrip_core::secret::ApiKey;
use daytrip_interaction::{OpenAiClientFactory, OpenAiCompletionClient};
use httpmock::prelude::*;
use serde_json::json;

fn request() -> CompletionRequest {
    CompletionRequest {
        prompt: "Plan my day".to_string(),
        temperature: 0.9,
        max_tokens: 1000,
    }
}

fn client_for(server: &MockServer) -> OpenAiCompletionClient {
    OpenAiCompletionClient::new(
        ApiKey::new("sk-test").unwrap(),
        "gpt-test",
        &server.url("/v1"),
    )
}

#[tokio::test]
async fn test_returns_first_choice_content() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("Authorization", "Bearer sk-test")
                .json_body_partial(
                    r#"{
                        "model": "gpt-test",
                        "messages": [{"role": "user", "content": "Plan my day"}],
                        "max_tokens": 1000
                    }"#,
                );
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "Itinerary 1: ..."}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            }));
        })
        .await;

    let text = client_for(&server).complete(&request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(text, "Itinerary 1: ...");
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401)
                .json_body(json!({"error": {"message": "Incorrect API key provided"}}));
        })
        .await;

    let err = client_for(&server).complete(&request()).await.unwrap_err();
    assert_eq!(
        err,
        CompletionError::Authentication("Incorrect API key provided".to_string())
    );
}

#[tokio::test]
async fn test_too_many_requests_maps_to_quota() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429)
                .json_body(json!({"error": {"message": "You exceeded your current quota"}}));
        })
        .await;

    let err = client_for(&server).complete(&request()).await.unwrap_err();
    assert_eq!(
        err,
        CompletionError::QuotaExceeded("You exceeded your current quota".to_string())
    );
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let err = client_for(&server).complete(&request()).await.unwrap_err();
    assert_eq!(err, CompletionError::EmptyResponse);
}

#[tokio::test]
async fn test_garbage_body_is_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).body("not json");
        })
        .await;

    let err = client_for(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    let client = OpenAiCompletionClient::new(
        ApiKey::new("sk-test").unwrap(),
        "gpt-test",
        "http://127.0.0.1:9/v1",
    );
    let err = client.complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Network(_)));
}

#[tokio::test]
async fn test_factory_binds_key_and_model() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("Authorization", "Bearer sk-factory")
                .json_body_partial(r#"{"model": "gpt-config"}"#);
            then.status(200)
                .json_body(json!({"choices": [{"message": {"content": "ok"}}]}));
        })
        .await;

    let config = ModelConfig {
        name: "gpt-config".to_string(),
        base_url: server.url("/v1"),
        ..ModelConfig::default()
    };
    let client = OpenAiClientFactory::new(&config).create(&ApiKey::new("sk-factory").unwrap());

    assert_eq!(client.complete(&request()).await.unwrap(), "ok");
    mock.assert_async().await;
}
