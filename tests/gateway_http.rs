//! Integration tests for the completion endpoint
//!
//! Exercises the axum router end to end against a mocked upstream
//! completion API: success, missing-credential, and upstream-failure
//! paths with their response bodies and status codes.

use serde_json::json;
use serial_test::serial;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kaiwa::config::OpenAiConfig;
use kaiwa::gateway::{routes, CompletionGateway};
use kaiwa::providers::OpenAiProvider;

const KEY_ENV: &str = "KAIWA_TEST_GATEWAY_KEY";

fn gateway_for(server_uri: &str) -> Arc<CompletionGateway> {
    let config = OpenAiConfig {
        api_base: server_uri.to_string(),
        api_key_env: KEY_ENV.to_string(),
        ..OpenAiConfig::default()
    };
    let provider = OpenAiProvider::new(config).expect("provider init failed");
    Arc::new(CompletionGateway::new(Box::new(provider), None))
}

fn chat_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
#[serial]
async fn test_chat_endpoint_relays_completion() {
    std::env::set_var(KEY_ENV, "test-key");
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Hello from upstream!" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let router = routes(gateway_for(&server.uri()));
    let response = router
        .oneshot(chat_request(json!({
            "messages": [{ "role": "user", "content": "Hello" }]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Hello from upstream!");

    std::env::remove_var(KEY_ENV);
}

#[tokio::test]
#[serial]
async fn test_chat_endpoint_missing_credential_returns_401() {
    std::env::remove_var(KEY_ENV);
    let server = MockServer::start().await;

    let router = routes(gateway_for(&server.uri()));
    let response = router
        .oneshot(chat_request(json!({
            "messages": [{ "role": "user", "content": "Hello" }]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing API credential");
}

#[tokio::test]
#[serial]
async fn test_chat_endpoint_upstream_failure_returns_500() {
    std::env::set_var(KEY_ENV, "test-key");
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let router = routes(gateway_for(&server.uri()));
    let response = router
        .oneshot(chat_request(json!({
            "messages": [{ "role": "user", "content": "Hello" }]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to get completion from provider");

    std::env::remove_var(KEY_ENV);
}

#[tokio::test]
#[serial]
async fn test_upstream_request_carries_fixed_parameters() {
    std::env::set_var(KEY_ENV, "test-key");
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let router = routes(gateway_for(&server.uri()));
    router
        .oneshot(chat_request(json!({
            "messages": [{ "role": "user", "content": "Hello" }]
        })))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["model"], "gpt-4o-mini");
    assert_eq!(sent["temperature"], 0.7);
    assert_eq!(sent["max_tokens"], 1000);
    assert_eq!(sent["messages"][0]["role"], "user");

    std::env::remove_var(KEY_ENV);
}
