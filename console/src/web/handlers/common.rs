// Common types and utilities for API handlers

use axum::{http::StatusCode, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ConsoleError;

// Helper type for API responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Map a console error onto the status the API answers with. Client errors
/// reported by the daemon pass through; anything else upstream is a 502.
pub fn error_response(err: &ConsoleError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match err {
        ConsoleError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ConsoleError::Api { status, .. } if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ConsoleError::Api { .. } | ConsoleError::Transport { .. } => StatusCode::BAD_GATEWAY,
        ConsoleError::Config(_) | ConsoleError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(err.message())))
}

// Query parameters
#[derive(Deserialize)]
pub struct ProjectQuery {
    pub project: Option<String>,
}

// Request bodies
#[derive(Deserialize)]
pub struct BulkNamesRequest {
    pub names: Vec<String>,
}

#[derive(Deserialize)]
pub struct BulkIdsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AcceptedOperation {
    pub operation_id: String,
    pub target_name: String,
}
