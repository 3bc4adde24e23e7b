//! Server events for asynchronous daemon operations
//!
//! The daemon reports the progress of every asynchronous operation as the
//! metadata of `GET /1.0/operations/{id}/wait`, modelled here as
//! [`OperationEvent`].
//!
//! # Flow
//!
//! ```text
//! OperationPoller → wait → OperationEvent → EventDispatcher → EventQueue.get
//!                                                  ↓
//!                                 on_success / on_failure, on_finish, remove
//! ```

pub mod dispatcher;
pub mod poller;

pub use dispatcher::{DispatchOutcome, EventDispatcher};
pub use poller::OperationPoller;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    Pending,
    Running,
    Cancelling,
    Cancelled,
    Success,
    Failure,
    #[serde(other)]
    Unknown,
}

impl OperationStatus {
    /// Terminal statuses end the operation; nothing follows them
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationStatus::Success | OperationStatus::Failure | OperationStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEvent {
    #[serde(rename = "id")]
    pub operation_id: String,
    pub status: OperationStatus,
    #[serde(
        rename = "err",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl OperationEvent {
    pub fn success(operation_id: &str) -> Self {
        Self {
            operation_id: operation_id.to_string(),
            status: OperationStatus::Success,
            error: None,
            description: String::new(),
        }
    }

    pub fn failure(operation_id: &str, error: &str) -> Self {
        Self {
            operation_id: operation_id.to_string(),
            status: OperationStatus::Failure,
            error: Some(error.to_string()),
            description: String::new(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_wait_metadata() {
        let op: OperationEvent = serde_json::from_value(json!({
            "id": "op-42",
            "class": "task",
            "description": "Starting instance",
            "status": "Success",
            "status_code": 200,
            "err": ""
        }))
        .unwrap();

        assert_eq!(op.operation_id, "op-42");
        assert_eq!(op.status, OperationStatus::Success);
        assert_eq!(op.error, None);
        assert_eq!(op.description, "Starting instance");
    }

    #[test]
    fn failure_keeps_error_text() {
        let op: OperationEvent = serde_json::from_value(json!({
            "id": "op-7",
            "status": "Failure",
            "err": "Failed to start device \"eth0\""
        }))
        .unwrap();
        assert_eq!(op.status, OperationStatus::Failure);
        assert_eq!(op.error.as_deref(), Some("Failed to start device \"eth0\""));
        assert!(op.status.is_terminal());
    }

    #[test]
    fn unknown_status_is_not_terminal() {
        let op: OperationEvent =
            serde_json::from_value(json!({"id": "op-1", "status": "Frobnicating"})).unwrap();
        assert_eq!(op.status, OperationStatus::Unknown);
        assert!(!op.status.is_terminal());
        assert!(!OperationStatus::Running.is_terminal());
    }
}
