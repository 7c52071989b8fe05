use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::message_dto::*},
    error::AppError,
};

/// 发送用户消息
///
/// 受理即返回 202；辅导回复经模拟打字延迟后异步写入对话记录，
/// 并通过事件总线通知订阅者。
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .validator
        .validate_message(&request.message)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let receipt = state
        .counselor_service
        .handle_message(&id, &request.message)
        .await?;

    let response = SendMessageResponse {
        message: MessageResponse::from(receipt.message),
        reply_pending: receipt.reply_pending,
        emergency_active: receipt.emergency_active,
        emergency_triggered: receipt.emergency_triggered,
    };

    Ok((StatusCode::ACCEPTED, Json(response)))
}

pub async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting transcript for session: {}", id);

    let messages = state.session_service.transcript(&id).await?;

    let response = TranscriptResponse {
        session_id: id,
        total: messages.len(),
        messages: messages.into_iter().map(MessageResponse::from).collect(),
    };

    Ok(Json(response))
}
