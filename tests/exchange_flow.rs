//! Integration tests for the submit → gateway → fold-back flow
//!
//! Drives a real session against a mocked upstream completion API and
//! checks the history fold-back, persistence across restarts, and the
//! failure-recovery policy.

use serde_json::json;
use serial_test::serial;
use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kaiwa::config::OpenAiConfig;
use kaiwa::gateway::CompletionGateway;
use kaiwa::providers::OpenAiProvider;
use kaiwa::session::{ChatSession, HistorySlot, Role, SubmitOutcome};

const KEY_ENV: &str = "KAIWA_TEST_EXCHANGE_KEY";

fn session_for(server_uri: &str, slot: HistorySlot) -> ChatSession {
    let config = OpenAiConfig {
        api_base: server_uri.to_string(),
        api_key_env: KEY_ENV.to_string(),
        ..OpenAiConfig::default()
    };
    let provider = OpenAiProvider::new(config).expect("provider init failed");
    let gateway = Arc::new(CompletionGateway::new(Box::new(provider), None));
    ChatSession::new(gateway, slot)
}

async fn mount_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
#[serial]
async fn test_exchange_folds_into_history_and_persists() {
    std::env::set_var(KEY_ENV, "test-key");
    let server = MockServer::start().await;
    mount_reply(&server, "Nice to meet you!").await;

    let dir = tempfile::tempdir().unwrap();
    let slot_path = dir.path().join("history");

    {
        let slot = HistorySlot::open(&slot_path).unwrap();
        let mut session = session_for(&server.uri(), slot);

        let outcome = session.append_exchange("Hi, I'm new here").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Completed);

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, Role::User);
        assert_eq!(session.messages()[1].role, Role::Assistant);
        assert_eq!(session.messages()[1].content, "Nice to meet you!");

        assert_eq!(session.histories().len(), 1);
        assert_eq!(session.histories()[0].title, "Hi, I'm new here");
        assert_eq!(session.histories()[0].messages, session.messages());
    }

    // A fresh session reads the slot once at startup and sees the history
    let slot = HistorySlot::open(&slot_path).unwrap();
    let session = session_for(&server.uri(), slot);
    assert_eq!(session.histories().len(), 1);
    assert_eq!(session.histories()[0].title, "Hi, I'm new here");
    assert_eq!(session.histories()[0].messages.len(), 2);
    assert!(session.current_history_id().is_none());

    std::env::remove_var(KEY_ENV);
}

#[tokio::test]
#[serial]
async fn test_second_exchange_sends_full_prior_sequence() {
    std::env::set_var(KEY_ENV, "test-key");
    let server = MockServer::start().await;
    mount_reply(&server, "Understood.").await;

    let dir = tempfile::tempdir().unwrap();
    let slot = HistorySlot::open(dir.path().join("history")).unwrap();
    let mut session = session_for(&server.uri(), slot);

    session.append_exchange("first question").await.unwrap();
    session.append_exchange("second question").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let messages = second["messages"].as_array().unwrap();
    // Full prior sequence plus the new user turn, timestamps stripped
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["content"], "first question");
    assert_eq!(messages[1]["content"], "Understood.");
    assert_eq!(messages[2]["content"], "second question");
    assert!(messages[0].get("timestamp").is_none());

    std::env::remove_var(KEY_ENV);
}

#[tokio::test]
#[serial]
async fn test_failed_exchange_persists_nothing() {
    std::env::set_var(KEY_ENV, "test-key");
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let slot_path = dir.path().join("history");

    {
        let slot = HistorySlot::open(&slot_path).unwrap();
        let mut session = session_for(&server.uri(), slot);

        let result = session.append_exchange("hello?").await;
        assert!(result.is_err());

        // The typed turn stays visible in the live transcript only
        assert_eq!(session.messages().len(), 1);
        assert!(session.histories().is_empty());
        assert!(!session.is_busy());
    }

    let slot = HistorySlot::open(&slot_path).unwrap();
    assert!(slot.load().is_empty());

    std::env::remove_var(KEY_ENV);
}

#[tokio::test]
#[serial]
async fn test_system_preamble_reaches_upstream() {
    std::env::set_var(KEY_ENV, "test-key");
    let server = MockServer::start().await;
    mount_reply(&server, "Certainly, friend!").await;

    let config = OpenAiConfig {
        api_base: server.uri(),
        api_key_env: KEY_ENV.to_string(),
        ..OpenAiConfig::default()
    };
    let provider = OpenAiProvider::new(config).unwrap();
    let gateway = Arc::new(CompletionGateway::new(
        Box::new(provider),
        Some("Always sign off with 'friend'.".to_string()),
    ));

    let dir = tempfile::tempdir().unwrap();
    let slot = HistorySlot::open(dir.path().join("history")).unwrap();
    let mut session = ChatSession::new(gateway, slot);

    session.append_exchange("Hello").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = sent["messages"].as_array().unwrap();
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "Always sign off with 'friend'.");
    assert_eq!(messages[1]["role"], "user");

    // The preamble never lands in the transcript or the history
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[0].role, Role::User);

    std::env::remove_var(KEY_ENV);
}
