//! Integration tests for the translation gateway against a local stub
//! backend: covers the success path and every failure conversion without
//! touching the real API.

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use polyglot_bot::languages::Language;
use polyglot_bot::translator::{TranslateError, Translator};

// ── Stub backend ──────────────────────────────────────────────────────────────

/// Serve `router` on an ephemeral local port; returns the messages URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}/v1/messages")
}

fn translator(api_url: String) -> Translator {
    Translator::new(
        Some("sk-ant-test".to_string()),
        "claude-sonnet-4-6".to_string(),
        1024,
        Duration::from_secs(5),
    )
    .with_api_url(api_url)
}

// ── Success path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn success_returns_trimmed_content() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async {
            Json(json!({
                "content": [{"type": "text", "text": "  Bom dia  "}]
            }))
        }),
    );
    let url = spawn_stub(router).await;

    let result = translator(url).translate("good morning", Language::Br).await;
    assert_eq!(result.unwrap(), "Bom dia");
}

#[tokio::test]
async fn request_carries_prompt_credentials_and_version() {
    // The stub reflects what it received back as the translation, so the
    // assertion can see the whole request without shared state.
    let router = Router::new().route(
        "/v1/messages",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let api_key = headers
                .get("x-api-key")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let version = headers
                .get("anthropic-version")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let reflected = format!(
                "key={api_key} version={version} model={} temp={} prompt={}",
                body["model"].as_str().unwrap_or(""),
                body["temperature"],
                body["messages"][0]["content"].as_str().unwrap_or(""),
            );
            Json(json!({"content": [{"type": "text", "text": reflected}]}))
        }),
    );
    let url = spawn_stub(router).await;

    let reflected = translator(url)
        .translate("xin chào", Language::Kr)
        .await
        .unwrap();
    assert!(reflected.contains("key=sk-ant-test"), "{reflected}");
    assert!(reflected.contains("version=2023-06-01"), "{reflected}");
    assert!(reflected.contains("model=claude-sonnet-4-6"), "{reflected}");
    assert!(reflected.contains("temp=0.2"), "{reflected}");
    assert!(reflected.contains("into Korean"), "{reflected}");
    assert!(reflected.contains("xin chào"), "{reflected}");
}

// ── Failure conversions ───────────────────────────────────────────────────────

#[tokio::test]
async fn api_error_status_becomes_typed_error() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "overloaded") }),
    );
    let url = spawn_stub(router).await;

    match translator(url).translate("hello", Language::Vi).await {
        Err(TranslateError::Api { status, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unparsable_response_becomes_malformed_error() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async { Json(json!({"unexpected": true})) }),
    );
    let url = spawn_stub(router).await;

    let result = translator(url).translate("hello", Language::Vi).await;
    assert!(matches!(result, Err(TranslateError::MalformedResponse(_))));
}

#[tokio::test]
async fn response_without_text_block_becomes_malformed_error() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async { Json(json!({"content": []})) }),
    );
    let url = spawn_stub(router).await;

    match translator(url).translate("hello", Language::Vi).await {
        Err(TranslateError::MalformedResponse(msg)) => {
            assert_eq!(msg, "no text content block");
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_failure_becomes_http_error() {
    // Port 1 is never listening locally.
    let result = translator("http://127.0.0.1:1/v1/messages".to_string())
        .translate("hello", Language::Vi)
        .await;
    assert!(matches!(result, Err(TranslateError::Http(_))));
}
