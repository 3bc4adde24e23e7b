//! Router-level tests: requests go through the axum router built by
//! `create_router`, the daemon behind it is mocked.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::fixtures::*;
use console::web::{create_router, AppState};
use console::NotificationKind;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn setup() -> (MockDaemon, AppState, Router) {
    let daemon = MockDaemon::start().await;
    let config = TestConfigBuilder::new(&daemon.base_url).build();
    let state = AppState::from_config(Arc::new(config)).expect("app state");
    let router = create_router(state.clone());
    (daemon, state, router)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_instance_action_returns_operation_id() {
    let (daemon, state, router) = setup().await;
    daemon
        .mock_instance_action_accepted(instances::WEB_1, "start", "op-42")
        .await;
    daemon
        .mock_operation_wait("op-42", "Success", "", Duration::from_millis(300))
        .await;

    let (status, body) = send(&router, empty("POST", "/api/instances/web-1/start?project=default")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["operation_id"], "op-42");
    assert_eq!(body["data"]["target_name"], "web-1");

    let (status, body) = send(&router, empty("GET", "/api/operations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["operation_ids"], json!(["op-42"]));
    assert_eq!(body["data"]["total"], 1);

    let (_, body) = send(&router, empty("GET", "/api/loading")).await;
    assert_eq!(body["data"]["instances"]["web-1"]["loading_type"], "Starting");

    let queue = state.correlation.event_queue.clone();
    assert!(
        wait_until(Duration::from_secs(5), || {
            let queue = queue.clone();
            async move { queue.is_empty().await }
        })
        .await
    );

    let (_, body) = send(&router, empty("GET", "/api/notification")).await;
    assert_eq!(body["data"]["type"], "positive");
    assert_eq!(body["data"]["message"], "Instance web-1 started.");
}

#[tokio::test]
async fn test_unknown_action_is_bad_request() {
    let (_daemon, state, router) = setup().await;

    let (status, _) = send(&router, empty("POST", "/api/instances/web-1/explode")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(state.correlation.event_queue.is_empty().await);
    assert!(!state.correlation.instance_loading.is_loading("web-1").await);
}

#[tokio::test]
async fn test_daemon_rejection_passes_client_status_through() {
    let (daemon, _state, router) = setup().await;
    daemon
        .mock_instance_action_rejected(instances::WEB_2, 404, "Instance not found")
        .await;

    let (status, body) = send(&router, empty("POST", "/api/instances/web-2/stop")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Instance not found");
}

#[tokio::test]
async fn test_daemon_server_error_is_bad_gateway() {
    let (daemon, _state, router) = setup().await;
    daemon
        .mock_instance_action_rejected(instances::WEB_2, 500, "database is locked")
        .await;

    let (status, _) = send(&router, empty("POST", "/api/instances/web-2/restart")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_member_action_route() {
    let (daemon, _state, router) = setup().await;
    daemon
        .mock_member_action_accepted(members::MEMBER_1, "restore", "op-m1")
        .await;
    daemon.mock_operation_success("op-m1").await;

    let (status, body) = send(&router, empty("POST", "/api/members/micro1/restore")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["operation_id"], "op-m1");
}

#[tokio::test]
async fn test_bulk_warning_delete_route() {
    let (daemon, _state, router) = setup().await;
    daemon.mock_warning_delete_success(warnings::WARNING_1).await;
    daemon.mock_warning_not_found(warnings::WARNING_2).await;

    let (status, body) = send(
        &router,
        post_json(
            "/api/bulk/warnings/delete",
            json!({"ids": [warnings::WARNING_1, warnings::WARNING_2]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["counts"]["fulfilledCount"], 1);
    assert_eq!(body["data"]["counts"]["rejectedCount"], 1);
    assert_eq!(body["data"]["results"][1]["status"], "rejected");
    assert_eq!(body["data"]["details"][1]["text"], "Error: Warning not found");
}

#[tokio::test]
async fn test_bulk_instance_route() {
    let (daemon, _state, router) = setup().await;
    daemon
        .mock_instance_action_accepted(instances::WEB_1, "stop", "op-s1")
        .await;
    daemon.mock_operation_success("op-s1").await;

    let (status, body) = send(
        &router,
        post_json("/api/bulk/instances/stop", json!({"names": ["web-1"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["summary"], "1 instance stopped.");
}

#[tokio::test]
async fn test_clear_notification() {
    let (_daemon, state, router) = setup().await;
    state.correlation.notifier.info("Refreshing", None);

    let (_, body) = send(&router, empty("GET", "/api/notification")).await;
    assert_eq!(body["data"]["type"], "information");

    let (status, _) = send(&router, empty("DELETE", "/api/notification")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.correlation.notifier.current().is_none());

    let (_, body) = send(&router, empty("GET", "/api/notification")).await;
    assert_eq!(body["data"], Value::Null);
    assert_ne!(
        state.correlation.notifier.current().map(|n| n.kind),
        Some(NotificationKind::Information)
    );
}
