//! Gateway Integration Tests
//!
//! Drives the console's HTTP client against the in-process fake engine.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use integration_tests::{rule_draft, rule_json, FakeEngine, TEST_API_KEY};
use reqwest::Method;
use serde_json::Value;
use vmod_client::RuleService;
use vmod_common::{ConnectionConfig, ConsoleError, SharedConnection};

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_api_key_sent_on_every_request() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    RuleService::new(&ctx).list_rules().await.unwrap();

    let request = engine.last_request().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/rules");
    assert_eq!(request.api_key.as_deref(), Some(TEST_API_KEY));
}

#[tokio::test]
async fn test_missing_key_is_unauthorized() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = FakeEngine::context_for(engine.connection_with_key(None)).unwrap();

    let err = RuleService::new(&ctx).list_rules().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid or missing API key");
    assert_eq!(engine.last_request().unwrap().api_key, None);
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = FakeEngine::context_for(engine.connection_with_key(Some("nope"))).unwrap();

    let err = RuleService::new(&ctx).list_rules().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Unauthorized));
}

#[tokio::test]
async fn test_key_change_applies_to_next_request() {
    let engine = FakeEngine::start().await.unwrap();
    let connection = engine.connection_with_key(None);
    let ctx = FakeEngine::context_for(connection.clone()).unwrap();
    let rules = RuleService::new(&ctx);

    assert!(rules.list_rules().await.unwrap_err().is_unauthorized());

    connection.set_api_key(Some(TEST_API_KEY.to_string()));
    assert!(rules.list_rules().await.unwrap().is_empty());
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_not_found_carries_detail() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let err = RuleService::new(&ctx).get_rule(999).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "Rule not found");
}

#[tokio::test]
async fn test_structured_detail_is_stringified() {
    let engine = FakeEngine::start().await.unwrap();
    engine.fail_next(422, r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#);
    let ctx = engine.context().unwrap();

    let err = RuleService::new(&ctx).list_rules().await.unwrap_err();
    assert_eq!(err.status_code(), Some(422));
    let message = err.to_string();
    let parsed: Value = serde_json::from_str(&message).unwrap();
    assert_eq!(parsed[0]["msg"], "field required");
}

#[tokio::test]
async fn test_plain_text_body_used_verbatim() {
    let engine = FakeEngine::start().await.unwrap();
    engine.fail_next(500, "Internal Server Error: db down");
    let ctx = engine.context().unwrap();

    let err = RuleService::new(&ctx).list_rules().await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.to_string(), "Internal Server Error: db down");
}

#[tokio::test]
async fn test_empty_body_falls_back_to_reason() {
    let engine = FakeEngine::start().await.unwrap();
    engine.fail_next(503, "");
    let ctx = engine.context().unwrap();

    let err = RuleService::new(&ctx).list_rules().await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.to_string(), "Service Unavailable");
}

#[tokio::test]
async fn test_unreachable_engine_is_transport_error() {
    let connection = SharedConnection::new(ConnectionConfig::new(
        "http://127.0.0.1:9",
        Some(TEST_API_KEY.to_string()),
    ));
    let ctx = FakeEngine::context_for(connection).unwrap();

    let err = RuleService::new(&ctx).list_rules().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Transport(_)), "got {err:?}");
}

// ============================================================================
// Response Bodies
// ============================================================================

#[tokio::test]
async fn test_no_content_yields_none() {
    let engine = FakeEngine::start().await.unwrap();
    let id = engine.seed_rule(rule_json("Temp", true));
    let ctx = engine.context().unwrap();

    let reply: Option<Value> = ctx
        .api()
        .request_json::<(), Value>(Method::DELETE, &format!("/api/rules/{id}"), &[], None)
        .await
        .unwrap();
    assert_eq!(reply, None);
    assert!(engine.rule(id).is_none());
}

#[tokio::test]
async fn test_created_status_is_success() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let draft = rule_draft("Created");
    let created = RuleService::new(&ctx).create_rule(&draft).await.unwrap();
    assert!(created.value.id > 0);
    assert_eq!(created.value.name, "Created");
}

#[tokio::test]
async fn test_trailing_slash_base_url() {
    let engine = FakeEngine::start().await.unwrap();
    let connection = SharedConnection::new(ConnectionConfig::new(
        format!("{}/", engine.base_url()),
        Some(TEST_API_KEY.to_string()),
    ));
    let ctx = FakeEngine::context_for(connection).unwrap();

    RuleService::new(&ctx).list_rules().await.unwrap();
    assert_eq!(engine.last_request().unwrap().path, "/api/rules");
}
