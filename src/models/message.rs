use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 消息作者
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// 用户消息
    User,
    /// 辅导回复
    Counselor,
}

/// 对话消息实体
///
/// 对话记录中的一轮发言，由所属会话独占；会话重置时销毁。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// 消息唯一标识
    pub id: String,

    /// 所属会话 ID
    pub session_id: String,

    /// 会话内序号（从 1 开始，保证对话记录有序）
    pub seq: u64,

    /// 消息文本
    pub text: String,

    /// 消息作者
    pub author: Author,

    /// 消息时间戳
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// 创建新消息
    pub fn new(session_id: &str, seq: u64, text: &str, author: Author) -> Self {
        Self {
            id: format!("msg_{}_{}", seq, Uuid::new_v4()),
            session_id: session_id.to_string(),
            seq,
            text: text.to_string(),
            author,
            timestamp: Utc::now(),
        }
    }

    /// 是否为用户消息
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let message = ChatMessage::new("session_1", 1, "hello", Author::User);
        assert_eq!(message.session_id, "session_1");
        assert_eq!(message.seq, 1);
        assert!(message.is_user());
        assert!(!message.id.is_empty());
    }

    #[test]
    fn test_counselor_message() {
        let message = ChatMessage::new("session_1", 2, "I'm here", Author::Counselor);
        assert!(!message.is_user());
    }
}
