// Correlation state endpoints: in-flight operations, loading and notification

use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use tracing::info;

use super::common::{ApiResponse, ApiResult};
use crate::notify::Notification;
use crate::web::{AppState, InFlightOperations, LoadingState};

/// Operation ids that still have callbacks registered
pub async fn get_in_flight_operations(
    State(state): State<AppState>,
) -> ApiResult<InFlightOperations> {
    let operation_ids = state.correlation.event_queue.operation_ids().await;
    let total = operation_ids.len();
    Ok(Json(ApiResponse::success(InFlightOperations {
        operation_ids,
        total,
    })))
}

/// Outstanding actions per instance and per cluster member
pub async fn get_loading_state(State(state): State<AppState>) -> ApiResult<LoadingState> {
    let instances = state.correlation.instance_loading.snapshot().await;
    let members = state.correlation.member_loading.snapshot().await;
    Ok(Json(ApiResponse::success(LoadingState { instances, members })))
}

pub async fn get_notification(State(state): State<AppState>) -> ApiResult<Option<Notification>> {
    Ok(Json(ApiResponse::success(state.correlation.notifier.current())))
}

pub async fn clear_notification(State(state): State<AppState>) -> ApiResult<Value> {
    state.correlation.notifier.clear();
    info!("Notification dismissed");
    Ok(Json(ApiResponse::success(json!({"cleared": true}))))
}
