use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 支付方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// 银行卡
    Card,
    /// 保险
    Insurance,
    /// 移动钱包
    MobileWallet,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Insurance => "insurance",
            PaymentMethod::MobileWallet => "mobile_wallet",
        };
        write!(f, "{}", label)
    }
}

/// 辅导形式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// 个体咨询
    Individual,
    /// 伴侣咨询
    Couples,
    /// 团体咨询
    Group,
    /// 工作坊
    Workshop,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionType::Individual => "individual",
            SessionType::Couples => "couples",
            SessionType::Group => "group",
            SessionType::Workshop => "workshop",
        };
        write!(f, "{}", label)
    }
}

/// 支付记录实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 记录唯一标识
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

impl PaymentRecord {
    /// 创建新支付记录
    pub fn new(
        therapist_id: &str,
        client_name: &str,
        amount_cents: u64,
        method: PaymentMethod,
        session_type: SessionType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            therapist_id: therapist_id.to_string(),
            client_name: client_name.to_string(),
            amount_cents,
            method,
            session_type,
            paid_at: Utc::now(),
        }
    }
}
