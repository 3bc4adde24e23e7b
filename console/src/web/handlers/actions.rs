// Action endpoints: single instance/member actions and bulk actions

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use tracing::{error, info};

use super::common::{
    error_response, AcceptedOperation, ApiResponse, ApiResult, BulkIdsRequest, BulkNamesRequest,
    ProjectQuery,
};
use crate::bulk::BulkReport;
use crate::http::responses::{InstanceStateAction, MemberStateAction};
use crate::web::AppState;

/// Start/stop/restart/freeze/unfreeze an instance
pub async fn execute_instance_action(
    Path((name, action)): Path<(String, InstanceStateAction)>,
    Query(query): Query<ProjectQuery>,
    State(state): State<AppState>,
) -> ApiResult<AcceptedOperation> {
    info!("Instance {} requested for: {}", action.verb(), name);

    match state
        .instance_service
        .change_state(&name, query.project.as_deref(), action)
        .await
    {
        Ok(operation_id) => Ok(Json(ApiResponse::success(AcceptedOperation {
            operation_id,
            target_name: name,
        }))),
        Err(e) => {
            error!("Instance {} failed for {}: {}", action.verb(), name, e);
            Err(error_response(&e))
        }
    }
}

/// Evacuate or restore a cluster member
pub async fn execute_member_action(
    Path((name, action)): Path<(String, MemberStateAction)>,
    State(state): State<AppState>,
) -> ApiResult<AcceptedOperation> {
    info!("Member {} requested for: {}", action.noun(), name);

    match state.member_service.change_state(&name, action).await {
        Ok(operation_id) => Ok(Json(ApiResponse::success(AcceptedOperation {
            operation_id,
            target_name: name,
        }))),
        Err(e) => {
            error!("Member {} failed for {}: {}", action.noun(), name, e);
            Err(error_response(&e))
        }
    }
}

/// Apply one action to many instances; answers once every instance settled
pub async fn execute_bulk_instance_action(
    Path(action): Path<InstanceStateAction>,
    Query(query): Query<ProjectQuery>,
    State(state): State<AppState>,
    Json(request): Json<BulkNamesRequest>,
) -> ApiResult<BulkReport> {
    let report = state
        .instance_service
        .bulk_change_state(&request.names, query.project.as_deref(), action)
        .await
        .map_err(|e| {
            error!("Bulk instance {} failed: {}", action.verb(), e);
            error_response(&e)
        })?;
    info!("Bulk instance {}: {}", action.verb(), report.summary);
    Ok(Json(ApiResponse::success(report)))
}

pub async fn bulk_delete_warnings(
    State(state): State<AppState>,
    Json(request): Json<BulkIdsRequest>,
) -> ApiResult<BulkReport> {
    let report = state
        .warning_service
        .bulk_delete(&request.ids)
        .await
        .map_err(|e| {
            error!("Bulk warning delete failed: {}", e);
            error_response(&e)
        })?;
    info!("Bulk warning delete: {}", report.summary);
    Ok(Json(ApiResponse::success(report)))
}
