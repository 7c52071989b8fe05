//! Earnings Routes
//!
//! 定义收入统计相关的 API 路由。

use crate::api::handlers::earnings_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建收入路由器
pub fn create_earnings_router() -> Router<AppState> {
    Router::new()
        .route("/payments", post(record_payment))
        .route("/therapists/:id/payments", get(list_payments))
        .route("/therapists/:id/earnings", get(get_earnings_summary))
}
