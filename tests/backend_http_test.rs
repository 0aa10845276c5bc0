//! Cloud and local backends against an in-process HTTP server

mod common;

use barbra::core::types::AiMode;
use barbra::llm::backend::{
    MSG_CLOUD_EMPTY, MSG_CLOUD_UNREACHABLE, MSG_LOCAL_EMPTY, MSG_LOCAL_UNREACHABLE,
};
use barbra::llm::AiBackends;
use common::{config_for, serve_once, DEAD_URL};

#[tokio::test]
async fn test_cloud_success_returns_first_choice() {
    let (base, request) = serve_once(
        200,
        r#"{"choices":[{"message":{"role":"assistant","content":"Hi! How can I help?"}},{"message":{"content":"second"}}]}"#,
    )
    .await;
    let backends = AiBackends::new(config_for(&base, DEAD_URL));

    let reply = backends
        .respond(AiMode::Cloud, Some("gsk-test"), "hello there")
        .await;
    assert!(reply.is_ai());
    assert_eq!(reply.message, "Hi! How can I help?");
    assert!(reply.action.is_none());

    let request = request.await.unwrap();
    assert!(request.head.starts_with("POST /v1/chat/completions"));
    assert_eq!(request.header("authorization").as_deref(), Some("Bearer gsk-test"));

    let body = request.json();
    assert_eq!(body["model"], "mixtral-8x7b-32768");
    assert_eq!(body["max_tokens"], 150);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(
        body["messages"][0]["content"],
        "You are BarbraAI, a helpful voice assistant. Parse user commands and respond naturally."
    );
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "hello there");
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cloud_missing_content_is_placeholder() {
    let (base, _request) = serve_once(200, r#"{"choices":[]}"#).await;
    let backends = AiBackends::new(config_for(&base, DEAD_URL));

    let reply = backends.respond(AiMode::Cloud, Some("k"), "hi").await;
    assert_eq!(reply.message, MSG_CLOUD_EMPTY);
}

#[tokio::test]
async fn test_cloud_error_status_is_connectivity_message() {
    let (base, _request) = serve_once(401, r#"{"error":{"message":"bad key"}}"#).await;
    let backends = AiBackends::new(config_for(&base, DEAD_URL));

    let reply = backends.respond(AiMode::Cloud, Some("k"), "hi").await;
    assert_eq!(reply.message, MSG_CLOUD_UNREACHABLE);
}

#[tokio::test]
async fn test_cloud_non_json_body_is_connectivity_message() {
    let (base, _request) = serve_once(200, "<html>captive portal</html>").await;
    let backends = AiBackends::new(config_for(&base, DEAD_URL));

    let reply = backends.respond(AiMode::Cloud, Some("k"), "hi").await;
    assert_eq!(reply.message, MSG_CLOUD_UNREACHABLE);
}

#[tokio::test]
async fn test_local_success_returns_generated_text() {
    let (base, request) = serve_once(
        200,
        r#"{"model":"llama2","response":"It is sunny.","done":true}"#,
    )
    .await;
    let backends = AiBackends::new(config_for(DEAD_URL, &base));

    let reply = backends.respond(AiMode::Local, None, "weather?").await;
    assert_eq!(reply.message, "It is sunny.");

    let request = request.await.unwrap();
    assert!(request.head.starts_with("POST /api/generate"));
    assert!(request.header("authorization").is_none());

    let body = request.json();
    assert_eq!(body["model"], "llama2");
    assert_eq!(body["stream"], false);
    assert_eq!(
        body["prompt"],
        "You are BarbraAI, a helpful voice assistant. Respond to: weather?"
    );
}

#[tokio::test]
async fn test_local_missing_response_is_placeholder() {
    let (base, _request) = serve_once(200, r#"{"done":true}"#).await;
    let backends = AiBackends::new(config_for(DEAD_URL, &base));

    let reply = backends.respond(AiMode::Local, None, "hi").await;
    assert_eq!(reply.message, MSG_LOCAL_EMPTY);
}

#[tokio::test]
async fn test_local_server_error_is_unavailable_message() {
    let (base, _request) = serve_once(500, r#"{"error":"model not found"}"#).await;
    let backends = AiBackends::new(config_for(DEAD_URL, &base));

    let reply = backends.respond(AiMode::Local, None, "hi").await;
    assert_eq!(reply.message, MSG_LOCAL_UNREACHABLE);
}
