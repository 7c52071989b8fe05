use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};

use crate::{
    api::{app_state::AppState, dto::session_dto::*},
    error::AppError,
    services::events::kinds,
    services::session::Pagination,
};

pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(name) = request.user_name.as_deref() {
        state
            .validator
            .validate_user_name(name)
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }

    let session = state
        .session_service
        .create(request.user_name.as_deref())
        .await?;
    state.metrics.record_session(1);
    info!("Created session {}", session.id);

    let response = CreateSessionResponse {
        id: session.id,
        created_at: session.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Query(params): Query<ListSessionsParams>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Listing sessions: page={:?}, page_size={:?}",
        params.page, params.page_size
    );

    let page = params.page.unwrap_or(1);
    let page_size = params
        .page_size
        .unwrap_or(state.config.session.default_page_size);

    let sessions = state
        .session_service
        .list(Pagination::new(page, page_size))
        .await?;
    let total = state.session_service.count().await?;

    let response = SessionListResponse {
        sessions: sessions.into_iter().map(SessionResponse::from).collect(),
        total: total as usize,
        page,
        page_size,
    };

    Ok(Json(response))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting session: {}", id);

    let session = state
        .session_service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))?;

    Ok(Json(SessionResponse::from(session)))
}

/// 重置会话：清空对话记录与紧急模式，中止未触发的延迟回复
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_service.reset(&id).await?;
    info!("Reset session {}", id);

    state
        .events
        .publish(&id, kinds::SESSION_RESET, serde_json::json!({}));

    Ok(Json(SessionResponse::from(session)))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.session_service.close(&id).await?;
    state.metrics.record_session(-1);
    info!("Closed session {}", id);

    Ok(StatusCode::NO_CONTENT)
}
