//! Message Routes
//!
//! 定义消息发送与对话记录的 API 路由。

use crate::api::handlers::message_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建消息路由器
pub fn create_message_router() -> Router<AppState> {
    Router::new()
        .route("/sessions/:id/messages", post(send_message))
        .route("/sessions/:id/messages", get(get_transcript))
}
