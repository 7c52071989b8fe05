//! 会话事件总线
//!
//! 对话记录之外的旁路通知通道：打字指示、回复送达、紧急警报、
//! 会话重置。事件以 JSON 字符串广播，主题格式为
//! `session:<会话ID>:<事件类型>`，由 WebSocket 层按订阅过滤转发。

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::debug;

/// 事件类型常量
pub mod kinds {
    /// 辅导方开始"打字"（延迟回复已排定）
    pub const TYPING_STARTED: &str = "typing_started";
    /// 辅导回复已写入对话记录
    pub const REPLY: &str = "reply";
    /// 会话首次进入紧急模式（旁路警报，区别于记录内的危机回复）
    pub const EMERGENCY_ALERT: &str = "emergency_alert";
    /// 会话已重置
    pub const SESSION_RESET: &str = "session_reset";
}

/// 构造事件主题
pub fn topic(session_id: &str, kind: &str) -> String {
    format!("session:{}:{}", session_id, kind)
}

/// 事件总线
///
/// 广播通道的轻量包装；无订阅者时发布是无害的空操作。
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<String>,
}

impl EventBus {
    /// 创建指定容量的事件总线
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 订阅事件流
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// 发布会话事件
    pub fn publish(&self, session_id: &str, kind: &str, data: serde_json::Value) {
        let event = serde_json::json!({
            "event": topic(session_id, kind),
            "kind": kind,
            "session_id": session_id,
            "data": data,
            "timestamp": Utc::now().to_rfc3339(),
        });
        // 只有存在订阅者时发送才会成功，失败可以安全忽略
        if self.sender.send(event.to_string()).is_err() {
            debug!("No subscribers for event '{}'", kind);
        }
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_format() {
        assert_eq!(topic("abc", kinds::REPLY), "session:abc:reply");
    }

    #[tokio::test]
    async fn test_publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish("s1", kinds::TYPING_STARTED, serde_json::json!({}));

        let raw = rx.recv().await.unwrap();
        let event: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(event["event"], "session:s1:typing_started");
        assert_eq!(event["session_id"], "s1");
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new(16);
        bus.publish("s1", kinds::REPLY, serde_json::json!({}));
        assert_eq!(bus.subscriber_count(), 0);
    }
}
