//! Mock hypervisor daemon for testing
//!
//! Answers the instance, cluster member, warning and operation endpoints the
//! console talks to, without a real daemon running.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock daemon server that simulates daemon HTTP responses
pub struct MockDaemon {
    pub server: MockServer,
    pub base_url: String,
}

fn async_response(operation_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(202).set_body_json(json!({
        "type": "async",
        "status": "Operation created",
        "status_code": 100,
        "operation": format!("/1.0/operations/{}", operation_id),
        "metadata": {
            "id": operation_id,
            "class": "task",
            "status": "Running",
            "status_code": 103,
            "err": ""
        }
    }))
}

fn error_response(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "type": "error",
        "error": message,
        "error_code": status,
        "metadata": null
    }))
}

fn operation_body(operation_id: &str, status: &str, err: &str) -> Value {
    json!({
        "type": "sync",
        "status": "Success",
        "status_code": 200,
        "metadata": {
            "id": operation_id,
            "class": "task",
            "description": "Test operation",
            "status": status,
            "err": err
        }
    })
}

impl MockDaemon {
    /// Create a new mock daemon
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Instance state change accepted as an async operation
    pub async fn mock_instance_action_accepted(&self, name: &str, action: &str, operation_id: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/1.0/instances/{}/state", name)))
            .and(body_partial_json(json!({"action": action})))
            .respond_with(async_response(operation_id))
            .mount(&self.server)
            .await;
    }

    /// Instance state change accepted only after `delay`
    pub async fn mock_instance_action_accepted_after(
        &self,
        name: &str,
        action: &str,
        operation_id: &str,
        delay: Duration,
    ) {
        Mock::given(method("PUT"))
            .and(path(format!("/1.0/instances/{}/state", name)))
            .and(body_partial_json(json!({"action": action})))
            .respond_with(async_response(operation_id).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Instance state change rejected outright
    pub async fn mock_instance_action_rejected(&self, name: &str, status: u16, message: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/1.0/instances/{}/state", name)))
            .respond_with(error_response(status, message))
            .mount(&self.server)
            .await;
    }

    /// Cluster member state change accepted as an async operation
    pub async fn mock_member_action_accepted(&self, name: &str, action: &str, operation_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/1.0/cluster/members/{}/state", name)))
            .and(body_partial_json(json!({"action": action})))
            .respond_with(async_response(operation_id))
            .mount(&self.server)
            .await;
    }

    /// Operation wait answers with a successful terminal state
    pub async fn mock_operation_success(&self, operation_id: &str) {
        self.mock_operation_wait(operation_id, "Success", "", Duration::ZERO)
            .await;
    }

    /// Operation wait answers with a failed terminal state
    pub async fn mock_operation_failure(&self, operation_id: &str, err: &str) {
        self.mock_operation_wait(operation_id, "Failure", err, Duration::ZERO)
            .await;
    }

    /// Operation wait answers after `delay`
    pub async fn mock_operation_wait(
        &self,
        operation_id: &str,
        status: &str,
        err: &str,
        delay: Duration,
    ) {
        Mock::given(method("GET"))
            .and(path(format!("/1.0/operations/{}/wait", operation_id)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(operation_body(operation_id, status, err))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// First wait answers that the operation is still running; later waits
    /// fall through to whatever else is mounted
    pub async fn mock_operation_running_once(&self, operation_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/1.0/operations/{}/wait", operation_id)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(operation_body(operation_id, "Running", "")),
            )
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Number of wait requests the daemon received for an operation
    pub async fn wait_requests(&self, operation_id: &str) -> usize {
        let wait_path = format!("/1.0/operations/{}/wait", operation_id);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == wait_path)
            .count()
    }

    /// Operation wait keeps failing with a server error
    pub async fn mock_operation_wait_broken(&self, operation_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/1.0/operations/{}/wait", operation_id)))
            .respond_with(error_response(500, "database is locked"))
            .mount(&self.server)
            .await;
    }

    /// Warning deletion succeeds
    pub async fn mock_warning_delete_success(&self, id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/1.0/warnings/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "sync",
                "status": "Success",
                "status_code": 200,
                "metadata": {}
            })))
            .mount(&self.server)
            .await;
    }

    /// Warning deletion fails with 404
    pub async fn mock_warning_not_found(&self, id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/1.0/warnings/{}", id)))
            .respond_with(error_response(404, "Warning not found"))
            .mount(&self.server)
            .await;
    }
}
