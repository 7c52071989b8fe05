//! 收入统计服务
//!
//! 面向咨询师的收入汇总：按客户、支付方式、会话类型三个维度
//! 聚合已收款记录，金额以分为单位累计，百分比在汇总时计算。

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::payment::{PaymentMethod, PaymentRecord, SessionType};

/// 单个聚合维度的一行
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownEntry {
    pub label: String,
    pub amount_cents: u64,
    pub count: u64,
    /// 占总额的百分比，保留一位小数；总额为零时为 0.0
    pub percentage: f64,
}

/// 收入汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsSummary {
    pub therapist_id: String,
    pub total_cents: u64,
    pub payment_count: u64,
    pub by_client: Vec<BreakdownEntry>,
    pub by_method: Vec<BreakdownEntry>,
    pub by_session_type: Vec<BreakdownEntry>,
}

/// 收入统计服务 trait
#[async_trait]
pub trait EarningsService: Send + Sync {
    /// 记录一笔已收款
    async fn record_payment(&self, payment: PaymentRecord) -> Result<PaymentRecord>;

    /// 某咨询师的全部收款记录，按收款时间倒序
    async fn payments(&self, therapist_id: &str) -> Result<Vec<PaymentRecord>>;

    /// 汇总某咨询师的收入
    async fn summary(&self, therapist_id: &str) -> Result<EarningsSummary>;
}

/// 内存实现：therapist_id -> 收款记录列表
pub struct EarningsServiceImpl {
    records: DashMap<String, Vec<PaymentRecord>>,
}

impl EarningsServiceImpl {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    fn breakdown<F>(records: &[PaymentRecord], total: u64, label_of: F) -> Vec<BreakdownEntry>
    where
        F: Fn(&PaymentRecord) -> String,
    {
        // BTreeMap 保证输出顺序稳定
        let mut buckets: BTreeMap<String, (u64, u64)> = BTreeMap::new();
        for record in records {
            let bucket = buckets.entry(label_of(record)).or_insert((0, 0));
            bucket.0 += record.amount_cents;
            bucket.1 += 1;
        }
        buckets
            .into_iter()
            .map(|(label, (amount_cents, count))| BreakdownEntry {
                label,
                amount_cents,
                count,
                percentage: if total == 0 {
                    0.0
                } else {
                    (amount_cents as f64 / total as f64 * 1000.0).round() / 10.0
                },
            })
            .collect()
    }
}

impl Default for EarningsServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EarningsService for EarningsServiceImpl {
    async fn record_payment(&self, payment: PaymentRecord) -> Result<PaymentRecord> {
        if payment.therapist_id.trim().is_empty() {
            return Err(AppError::Validation(
                "therapist_id must not be empty".to_string(),
            ));
        }
        if payment.client_name.trim().is_empty() {
            return Err(AppError::Validation(
                "client_name must not be empty".to_string(),
            ));
        }
        debug!(
            "Recording payment {} for therapist {}",
            payment.id, payment.therapist_id
        );
        self.records
            .entry(payment.therapist_id.clone())
            .or_default()
            .push(payment.clone());
        Ok(payment)
    }

    async fn payments(&self, therapist_id: &str) -> Result<Vec<PaymentRecord>> {
        let mut records = self
            .records
            .get(therapist_id)
            .map(|r| r.clone())
            .unwrap_or_default();
        records.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(records)
    }

    async fn summary(&self, therapist_id: &str) -> Result<EarningsSummary> {
        let records = self
            .records
            .get(therapist_id)
            .map(|r| r.clone())
            .unwrap_or_default();

        let total: u64 = records.iter().map(|r| r.amount_cents).sum();

        Ok(EarningsSummary {
            therapist_id: therapist_id.to_string(),
            total_cents: total,
            payment_count: records.len() as u64,
            by_client: Self::breakdown(&records, total, |r| r.client_name.clone()),
            by_method: Self::breakdown(&records, total, |r| r.method.to_string()),
            by_session_type: Self::breakdown(&records, total, |r| r.session_type.to_string()),
        })
    }
}

/// 创建收入统计服务
pub fn create_earnings_service() -> Arc<dyn EarningsService> {
    Arc::new(EarningsServiceImpl::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(
        therapist: &str,
        client: &str,
        cents: u64,
        method: PaymentMethod,
        session_type: SessionType,
    ) -> PaymentRecord {
        PaymentRecord::new(therapist, client, cents, method, session_type)
    }

    #[tokio::test]
    async fn test_record_and_summarize() {
        let service = EarningsServiceImpl::new();
        service
            .record_payment(payment(
                "t1",
                "Ana",
                6_000,
                PaymentMethod::Card,
                SessionType::Individual,
            ))
            .await
            .unwrap();
        service
            .record_payment(payment(
                "t1",
                "Ben",
                4_000,
                PaymentMethod::Insurance,
                SessionType::Couples,
            ))
            .await
            .unwrap();

        let summary = service.summary("t1").await.unwrap();
        assert_eq!(summary.total_cents, 10_000);
        assert_eq!(summary.payment_count, 2);

        let ana = summary
            .by_client
            .iter()
            .find(|e| e.label == "Ana")
            .unwrap();
        assert_eq!(ana.amount_cents, 6_000);
        assert_eq!(ana.percentage, 60.0);

        let insurance = summary
            .by_method
            .iter()
            .find(|e| e.label == "insurance")
            .unwrap();
        assert_eq!(insurance.percentage, 40.0);
    }

    #[tokio::test]
    async fn test_empty_summary_has_zero_percentages() {
        let service = EarningsServiceImpl::new();
        let summary = service.summary("nobody").await.unwrap();
        assert_eq!(summary.total_cents, 0);
        assert_eq!(summary.payment_count, 0);
        assert!(summary.by_client.is_empty());
    }

    #[tokio::test]
    async fn test_payments_sorted_newest_first() {
        let service = EarningsServiceImpl::new();
        let mut older = payment("t1", "Ana", 100, PaymentMethod::Card, SessionType::Group);
        older.paid_at = chrono::Utc::now() - chrono::Duration::days(2);
        service.record_payment(older).await.unwrap();
        service
            .record_payment(payment(
                "t1",
                "Ben",
                200,
                PaymentMethod::MobileWallet,
                SessionType::Workshop,
            ))
            .await
            .unwrap();

        let records = service.payments("t1").await.unwrap();
        assert_eq!(records[0].client_name, "Ben");
        assert_eq!(records[1].client_name, "Ana");
    }

    #[tokio::test]
    async fn test_rejects_blank_identifiers() {
        let service = EarningsServiceImpl::new();
        let err = service
            .record_payment(payment(
                " ",
                "Ana",
                100,
                PaymentMethod::Card,
                SessionType::Individual,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
