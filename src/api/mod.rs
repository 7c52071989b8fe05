//! API 模块
//!
//! 提供 REST API 与 WebSocket 事件订阅支持。

#[cfg(test)]
mod api_tests;
pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::error::AppError;
use crate::websocket::ws_handler;
use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::session_routes::create_session_router())
        .merge(routes::message_routes::create_message_router())
        .merge(routes::earnings_routes::create_earnings_router());

    let shared = Arc::new(app_state.clone());

    Router::new()
        .nest("/api/v1", api)
        .route("/api/v1/ws", get(ws_handler))
        .layer(Extension(shared))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

pub async fn initialize_api(app_state: AppState) -> Result<Router, AppError> {
    tracing::info!("Initializing API router...");
    Ok(create_router(app_state))
}
