//! Completion client against a local mock of the OpenAI-compatible API.

use std::net::SocketAddr;

use ai_llm_service::services::open_ai_service::OpenAiService;
use ai_llm_service::{LlmModelConfig, LlmProvider, LlmServiceProfiles};
use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn cfg(endpoint: String) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: "llama3-8b-8192".into(),
        endpoint,
        api_key: Some("test-key".into()),
        max_tokens: Some(800),
        temperature: Some(0.5),
        top_p: None,
        timeout_secs: Some(5),
    }
}

async fn echo_chat(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth != "Bearer test-key" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
    }
    assert_eq!(body["model"], "llama3-8b-8192");
    assert_eq!(body["max_tokens"], 800);
    assert_eq!(body["messages"][0]["content"], "You are a helpful legal assistant.");
    (
        StatusCode::OK,
        Json(json!({
            "choices": [{"message": {"role": "assistant", "content": " Hello "}}]
        })),
    )
}

#[tokio::test]
async fn returns_trimmed_first_choice() {
    let addr = spawn(Router::new().route("/v1/chat/completions", post(echo_chat))).await;
    let svc = OpenAiService::new(cfg(format!("http://{addr}"))).unwrap();

    let out = svc
        .generate("Say hello", Some("You are a helpful legal assistant."))
        .await
        .unwrap();
    assert_eq!(out, "Hello");
}

#[tokio::test]
async fn non_success_status_carries_body() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::UNAUTHORIZED, r#"{"error":"invalid api key"}"#) }),
    );
    let addr = spawn(app).await;
    let profiles = LlmServiceProfiles::new(cfg(format!("http://{addr}")), None, Some(2)).unwrap();

    let err = profiles.complete("anything", None).await.unwrap_err();
    assert_eq!(err.kind(), "COMPLETION_HTTP_STATUS");
    assert_eq!(err.response_body(), Some(r#"{"error":"invalid api key"}"#));
    assert!(err.user_message().contains("401"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let svc = OpenAiService::new(cfg(format!("http://{addr}"))).unwrap();
    let err = svc.generate("anything", None).await.unwrap_err();
    assert_eq!(err.kind(), "COMPLETION_TRANSPORT_ERROR");
    assert!(err.user_message().ends_with("Response: No response"));
}

#[tokio::test]
async fn slow_upstream_is_a_timeout() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            Json(json!({"choices": [{"message": {"content": "late"}}]}))
        }),
    );
    let addr = spawn(app).await;
    let svc = OpenAiService::new(LlmModelConfig {
        timeout_secs: Some(1),
        ..cfg(format!("http://{addr}"))
    })
    .unwrap();

    let err = svc.generate("anything", None).await.unwrap_err();
    assert_eq!(err.kind(), "COMPLETION_TIMEOUT");
    assert!(err.user_message().ends_with("Response: No response"));
}

#[tokio::test]
async fn health_reports_listed_model() {
    let app = Router::new().route(
        "/v1/models",
        get(|| async { Json(json!({"data": [{"id": "llama3-8b-8192"}, {"id": "other"}]})) }),
    );
    let addr = spawn(app).await;
    let profiles = LlmServiceProfiles::new(cfg(format!("http://{addr}")), None, Some(2)).unwrap();

    let statuses = profiles.health_all().await;
    assert_eq!(statuses.len(), 1);
    assert!(statuses[0].ok, "{}", statuses[0].message);
    assert_eq!(statuses[0].model.as_deref(), Some("llama3-8b-8192"));
}
