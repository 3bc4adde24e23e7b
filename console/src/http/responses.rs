// File: console/src/http/responses.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every daemon response shares this envelope; `type` is one of
/// `sync`, `async` or `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(rename = "type")]
    pub response_type: String,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<u16>,
    #[serde(default)]
    pub metadata: Value,
}

impl ApiEnvelope {
    pub fn is_error(&self) -> bool {
        self.response_type == "error"
    }

    /// Operation id of an async response: `metadata.id`, or the last path
    /// segment of `operation` when the metadata is missing.
    pub fn operation_id(&self) -> Option<String> {
        if let Some(id) = self.metadata.get("id").and_then(|v| v.as_str()) {
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
        self.operation
            .as_deref()
            .and_then(|url| url.split('?').next())
            .and_then(|path| path.rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStateAction {
    Start,
    Stop,
    Restart,
    Freeze,
    Unfreeze,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstanceStatePut {
    pub action: InstanceStateAction,
    pub timeout: i64,
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStateAction {
    Evacuate,
    Restore,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberStatePost {
    pub action: MemberStateAction,
}
