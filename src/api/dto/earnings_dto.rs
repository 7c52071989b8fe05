//! 收入 DTO
//!
//! 定义支付记录与收入汇总的数据结构。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::payment::{PaymentMethod, PaymentRecord, SessionType};
use crate::services::earnings::{BreakdownEntry, EarningsSummary};

/// 记录支付请求
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// 治疗师 ID
    pub therapist_id: String,
    /// 来访者名称
    pub client_name: String,
    /// 金额（美分）
    pub amount_cents: u64,
    /// 支付方式
    pub method: PaymentMethod,
    /// 辅导形式
    pub session_type: SessionType,
}

/// 支付记录响应
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// 记录 ID
    pub id: String,
    /// 治疗师 ID
    pub therapist_id: String,
    /// 来访者名称
    pub client_name: String,
    /// 金额（美分）
    pub amount_cents: u64,
    /// 支付方式
    pub method: PaymentMethod,
    /// 辅导形式
    pub session_type: SessionType,
    /// 支付时间
    pub paid_at: DateTime<Utc>,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id,
            therapist_id: record.therapist_id,
            client_name: record.client_name,
            amount_cents: record.amount_cents,
            method: record.method,
            session_type: record.session_type,
            paid_at: record.paid_at,
        }
    }
}

/// 收入汇总响应
#[derive(Debug, Serialize)]
pub struct EarningsSummaryResponse {
    /// 治疗师 ID
    pub therapist_id: String,
    /// 收入总额（美分）
    pub total_cents: u64,
    /// 收款笔数
    pub payment_count: u64,
    /// 按来访者聚合
    pub by_client: Vec<BreakdownEntry>,
    /// 按支付方式聚合
    pub by_method: Vec<BreakdownEntry>,
    /// 按辅导形式聚合
    pub by_session_type: Vec<BreakdownEntry>,
}

impl From<EarningsSummary> for EarningsSummaryResponse {
    fn from(summary: EarningsSummary) -> Self {
        Self {
            therapist_id: summary.therapist_id,
            total_cents: summary.total_cents,
            payment_count: summary.payment_count,
            by_client: summary.by_client,
            by_method: summary.by_method,
            by_session_type: summary.by_session_type,
        }
    }
}

/// 支付记录列表响应
#[derive(Debug, Serialize)]
pub struct PaymentListResponse {
    /// 治疗师 ID
    pub therapist_id: String,
    /// 按收款时间倒序的记录
    pub payments: Vec<PaymentResponse>,
    /// 记录总数
    pub total: usize,
}
