//! Router behavior through `tower::ServiceExt::oneshot`, with a canned chat
//! backend and the local hashing embedder.

use std::sync::Arc;

use ai_llm_service::{LlmModelConfig, LlmProvider, LlmServiceProfiles};
use api::{ApiConfig, AppState, router};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use contextor::llm::ChatFuture;
use contextor::{ChatBackend, ContextorConfig, ContractSession};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use rag_base::{ChunkConfig, HashingEmbedder};
use serde_json::{Value, json};
use tower::ServiceExt;

struct CannedChat;

impl ChatBackend for CannedChat {
    fn chat<'a>(&'a self, _system: &'a str, user: &'a str) -> ChatFuture<'a> {
        let words = user.split_whitespace().count();
        Box::pin(async move { Ok(format!("answer over {words} words")) })
    }
}

/// Nothing listens on port 9 of the loopback interface in the test sandbox.
fn unreachable_profiles() -> Arc<LlmServiceProfiles> {
    let cfg = LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: "llama3-8b-8192".into(),
        endpoint: "http://127.0.0.1:9".into(),
        api_key: Some("test-key".into()),
        max_tokens: Some(800),
        temperature: Some(0.5),
        top_p: None,
        timeout_secs: Some(2),
    };
    Arc::new(LlmServiceProfiles::new(cfg, None, Some(1)).unwrap())
}

fn state_with_limit(max_upload_bytes: usize) -> AppState {
    let mut cfg = ContextorConfig::default();
    cfg.rag.chunk = ChunkConfig {
        size: 30,
        overlap: 5,
    };
    let session = ContractSession::new(
        cfg,
        Arc::new(CannedChat),
        Arc::new(HashingEmbedder::new(384).unwrap()),
    );
    let api_cfg = ApiConfig {
        max_upload_bytes,
        ..ApiConfig::default()
    };
    AppState::new(session, unreachable_profiles(), &api_cfg)
}

fn app_with_limit(max_upload_bytes: usize) -> Router {
    router(state_with_limit(max_upload_bytes))
}

fn app() -> Router {
    app_with_limit(ApiConfig::default().max_upload_bytes)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn raw_request(method: Method, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/pdf")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn one_page_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

#[tokio::test]
async fn nda_answer_is_wrapped_in_envelope() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/nda",
            json!({"discloser": "Acme", "receiver": "Beta", "purpose": "Evaluation", "duration": "2 years"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["task"], "draft_nda");
    assert!(body["data"]["answer"].as_str().unwrap().starts_with("answer over"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn blank_nda_field_is_a_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/nda", json!({"discloser": "Acme", "receiver": "  "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
    assert_eq!(body["error"]["details"][0]["path"], "receiver");
}

#[tokio::test]
async fn document_tasks_without_upload_conflict() {
    let app = app();
    let (status, body) = send(&app, json_request(Method::POST, "/summarize", json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "NO_DOCUMENT");

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/ask", json!({"question": "How long is the term?"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_json_is_mapped_into_envelope() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/explain")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"clause\": "))
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn wrong_field_type_names_the_field() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/explain", json!({"clause": 42})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_BODY");
}

#[tokio::test]
async fn garbage_upload_is_unprocessable() {
    let app = app();
    let (status, body) = send(
        &app,
        raw_request(Method::PUT, "/document", b"definitely not a pdf".to_vec()),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "DOCUMENT_UNREADABLE");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = app_with_limit(64);
    let (status, body) = send(&app, raw_request(Method::PUT, "/document", vec![b'x'; 1024])).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn upload_ask_and_clear() {
    let app = app();
    let pdf = one_page_pdf("The term is 12 months. Confidentiality survives termination.");

    let (status, body) = send(&app, raw_request(Method::PUT, "/document", pdf)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pages"], 1);
    assert!(body["data"]["indexed_chunks"].is_null());

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/ask", json!({"question": "How long is the term?", "top_k": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["task"], "ask");
    assert_eq!(body["data"]["context"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/document")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["indexed_chunks"].as_u64().unwrap() >= 2);

    let (status, body) = send(
        &app,
        Request::builder()
            .method(Method::DELETE)
            .uri("/document")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cleared"], true);

    let (status, _) = send(&app, json_request(Method::POST, "/summarize", json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn health_reports_unreachable_provider_without_failing() {
    let app = app();
    let (status, body) = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let statuses = body["data"].as_array().unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0]["ok"], false);
}

#[tokio::test]
async fn zero_top_k_is_a_bad_request_and_skips_indexing() {
    let app = app();
    let pdf = one_page_pdf("The term is 12 months. Confidentiality survives termination.");
    let (status, _) = send(&app, raw_request(Method::PUT, "/document", pdf)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/ask", json!({"question": "How long is the term?", "top_k": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FIELD");
    assert_eq!(body["error"]["details"][0]["path"], "top_k");

    let (status, body) = send(
        &app,
        Request::builder().uri("/document").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["indexed_chunks"].is_null());
}

#[tokio::test]
async fn stateless_tasks_do_not_wait_for_the_session() {
    let state = state_with_limit(ApiConfig::default().max_upload_bytes);
    let app = router(state.clone());
    let _held = state.session.lock().await;

    let request = send(
        &app,
        json_request(Method::POST, "/explain", json!({"clause": "The term is 12 months."})),
    );
    let (status, body) = tokio::time::timeout(std::time::Duration::from_secs(5), request)
        .await
        .expect("explain must not block on the session lock");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["task"], "explain_clause");
}
