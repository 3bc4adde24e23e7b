// File: console/src/web/server.rs
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub async fn start_web_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // === CORRELATION STATE ===
        .route("/api/operations", get(handlers::get_in_flight_operations))
        .route("/api/loading", get(handlers::get_loading_state))
        .route(
            "/api/notification",
            get(handlers::get_notification).delete(handlers::clear_notification),
        )
        // === SINGLE ACTIONS ===
        .route(
            "/api/instances/{name}/{action}",
            post(handlers::execute_instance_action),
        )
        .route(
            "/api/members/{name}/{action}",
            post(handlers::execute_member_action),
        )
        // === BULK ACTIONS ===
        .route(
            "/api/bulk/instances/{action}",
            post(handlers::execute_bulk_instance_action),
        )
        .route(
            "/api/bulk/warnings/delete",
            post(handlers::bulk_delete_warnings),
        )
        // Add middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
