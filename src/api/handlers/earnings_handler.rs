use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::earnings_dto::*},
    error::AppError,
    models::payment::PaymentRecord,
};

pub async fn record_payment(
    State(state): State<AppState>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = PaymentRecord::new(
        &request.therapist_id,
        &request.client_name,
        request.amount_cents,
        request.method,
        request.session_type,
    );

    let record = state.earnings_service.record_payment(record).await?;

    Ok((StatusCode::CREATED, Json(PaymentResponse::from(record))))
}

pub async fn get_earnings_summary(
    State(state): State<AppState>,
    Path(therapist_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Summarizing earnings for therapist: {}", therapist_id);

    let summary = state.earnings_service.summary(&therapist_id).await?;

    Ok(Json(EarningsSummaryResponse::from(summary)))
}

pub async fn list_payments(
    State(state): State<AppState>,
    Path(therapist_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.earnings_service.payments(&therapist_id).await?;

    let response = PaymentListResponse {
        therapist_id,
        total: payments.len(),
        payments: payments.into_iter().map(PaymentResponse::from).collect(),
    };

    Ok(Json(response))
}
