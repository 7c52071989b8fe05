//! 消息 DTO
//!
//! 定义消息发送与对话记录查询的数据结构。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::message::{Author, ChatMessage};

/// 发送消息请求
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// 消息正文
    pub message: String,
}

/// 单条消息响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// 消息 ID
    pub id: String,
    /// 会话内序号
    pub seq: u64,
    /// 消息正文
    pub text: String,
    /// 发送方（user / counselor）
    pub author: Author,
    /// 发送时间
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            seq: message.seq,
            text: message.text,
            author: message.author,
            timestamp: message.timestamp,
        }
    }
}

/// 发送消息响应
///
/// 辅导回复是异步送达的，这里只返回受理结果；
/// 回复本身通过 WebSocket 事件或后续的对话记录查询获取。
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    /// 已写入对话记录的用户消息
    pub message: MessageResponse,
    /// 延迟回复是否已排定
    pub reply_pending: bool,
    /// 会话当前是否处于紧急模式
    pub emergency_active: bool,
    /// 本条消息是否触发了紧急模式迁移
    pub emergency_triggered: bool,
}

/// 对话记录响应
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    /// 会话 ID
    pub session_id: String,
    /// 按序号排列的消息
    pub messages: Vec<MessageResponse>,
    /// 消息总数
    pub total: usize,
}
