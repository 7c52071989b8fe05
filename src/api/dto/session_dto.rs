//! 会话 DTO
//!
//! 定义会话相关的请求和响应数据结构。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::session::ChatSession;

/// 创建会话请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateSessionRequest {
    /// 用户显示名，用于回复的人称化
    pub user_name: Option<String>,
}

/// 创建会话响应
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    /// 会话 ID
    pub id: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 列表查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ListSessionsParams {
    /// 页码（从 1 开始）
    pub page: Option<usize>,
    /// 每页数量
    pub page_size: Option<usize>,
}

/// 会话统计响应
#[derive(Debug, Serialize)]
pub struct SessionStatsResponse {
    /// 用户消息数
    pub user_messages: u64,
    /// 辅导回复数
    pub counselor_messages: u64,
    /// 重置次数
    pub resets: u64,
}

/// 会话响应
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// 会话 ID
    pub id: String,
    /// 用户显示名
    pub user_name: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 最后活跃时间
    pub last_active_at: DateTime<Utc>,
    /// 会话状态
    pub status: String,
    /// 紧急模式
    pub emergency_mode: String,
    /// 统计信息
    pub stats: SessionStatsResponse,
}

impl From<ChatSession> for SessionResponse {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id,
            user_name: session.user_name,
            created_at: session.created_at,
            last_active_at: session.last_active_at,
            status: format!("{:?}", session.status).to_lowercase(),
            emergency_mode: format!("{:?}", session.emergency_mode).to_lowercase(),
            stats: SessionStatsResponse {
                user_messages: session.stats.user_messages,
                counselor_messages: session.stats.counselor_messages,
                resets: session.stats.resets,
            },
        }
    }
}

/// 会话列表响应
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    /// 当前页的会话
    pub sessions: Vec<SessionResponse>,
    /// 会话总数
    pub total: usize,
    /// 页码
    pub page: usize,
    /// 每页数量
    pub page_size: usize,
}
