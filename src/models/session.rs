use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 会话状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionStatus {
    /// 活跃状态
    Active,
    /// 已关闭
    Closed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Active
    }
}

/// 紧急模式状态机
///
/// 初始为 Normal；会话内首次检测到危机消息时一次性进入 Emergency。
/// 会话存续期内不存在 Emergency → Normal 的迁移，只有完整重置
/// （对话框关闭后重开的服务端等价物）才回到 Normal。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyMode {
    /// 常规状态
    #[default]
    Normal,
    /// 紧急状态（粘滞，非重置不清除）
    Emergency,
}

/// 会话统计信息
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionStats {
    /// 用户消息总数
    pub user_messages: u64,
    /// 辅导回复总数
    pub counselor_messages: u64,
    /// 重置次数
    pub resets: u64,
}

/// 聊天会话实体
///
/// 每个会话独占自己的对话记录与紧急标志，会话之间无共享可变状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// 会话唯一标识
    pub id: String,

    /// 用户展示名（用于回复个性化）
    pub user_name: Option<String>,

    /// 会话创建时间
    pub created_at: DateTime<Utc>,

    /// 最后活跃时间
    pub last_active_at: DateTime<Utc>,

    /// 会话状态
    pub status: SessionStatus,

    /// 紧急模式
    pub emergency_mode: EmergencyMode,

    /// 统计信息
    pub stats: SessionStats,
}

impl ChatSession {
    /// 创建新会话
    pub fn new(user_name: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_name: user_name.map(str::to_string),
            created_at: now,
            last_active_at: now,
            status: SessionStatus::Active,
            emergency_mode: EmergencyMode::Normal,
            stats: SessionStats::default(),
        }
    }

    /// 更新最后活跃时间
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// 是否处于紧急模式
    pub fn is_emergency(&self) -> bool {
        self.emergency_mode == EmergencyMode::Emergency
    }

    /// 进入紧急模式
    ///
    /// 仅在首次调用时发生状态迁移，返回 true 表示本次调用触发了迁移。
    pub fn enter_emergency(&mut self) -> bool {
        if self.emergency_mode == EmergencyMode::Emergency {
            return false;
        }
        self.emergency_mode = EmergencyMode::Emergency;
        true
    }

    /// 完整重置：清除紧急模式与统计，保留会话标识
    pub fn reset(&mut self) {
        self.emergency_mode = EmergencyMode::Normal;
        self.stats.user_messages = 0;
        self.stats.counselor_messages = 0;
        self.stats.resets += 1;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_normal() {
        let session = ChatSession::new(Some("Maya"));
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.emergency_mode, EmergencyMode::Normal);
        assert!(!session.is_emergency());
    }

    #[test]
    fn test_emergency_transition_fires_once() {
        let mut session = ChatSession::new(None);
        assert!(session.enter_emergency());
        assert!(session.is_emergency());
        // 二次进入不再触发迁移
        assert!(!session.enter_emergency());
        assert!(session.is_emergency());
    }

    #[test]
    fn test_reset_clears_emergency() {
        let mut session = ChatSession::new(None);
        session.enter_emergency();
        session.stats.user_messages = 3;
        session.reset();
        assert!(!session.is_emergency());
        assert_eq!(session.stats.user_messages, 0);
        assert_eq!(session.stats.resets, 1);
    }
}
