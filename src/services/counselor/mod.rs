//! 辅导服务
//!
//! 会话消息的处理管线：写入用户消息、意图分类、紧急模式迁移、
//! 排定带模拟打字延迟的辅导回复，并通过事件总线发出旁路通知。
//!
//! 分类与回复生成本身是同步纯函数（见 brain 模块）；这里的唯一
//! 异步性是人为的打字延迟，实现为每条回复一个可取消的延迟任务，
//! 快速连发的消息各自排定独立的回复，互不合并。

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::brain::{Intent, classify, respond};
use crate::config::config::CounselorConfig;
use crate::error::{AppError, Result};
use crate::models::message::{Author, ChatMessage};
use crate::models::session::SessionStatus;
use crate::observability::AppMetrics;
use crate::services::events::{EventBus, kinds};
use crate::services::session::SessionStore;

/// 消息受理回执
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReceipt {
    /// 已写入对话记录的用户消息
    pub message: ChatMessage,
    /// 延迟回复是否已排定
    pub reply_pending: bool,
    /// 会话当前是否处于紧急模式
    pub emergency_active: bool,
    /// 本条消息是否触发了紧急模式迁移
    pub emergency_triggered: bool,
}

/// 辅导服务 trait
#[async_trait]
pub trait CounselorService: Send + Sync {
    /// 处理一条用户消息
    async fn handle_message(&self, session_id: &str, text: &str) -> Result<MessageReceipt>;
}

/// 辅导服务实现
pub struct CounselorServiceImpl {
    store: Arc<SessionStore>,
    events: EventBus,
    metrics: Arc<AppMetrics>,
    config: CounselorConfig,
}

impl CounselorServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        store: Arc<SessionStore>,
        events: EventBus,
        metrics: Arc<AppMetrics>,
        config: CounselorConfig,
    ) -> Self {
        Self {
            store,
            events,
            metrics,
            config,
        }
    }

    /// 采样模拟打字延迟
    fn sample_typing_delay(&self) -> Duration {
        let lo = self.config.typing_delay_min_ms.min(self.config.typing_delay_max_ms);
        let hi = self.config.typing_delay_min_ms.max(self.config.typing_delay_max_ms);
        let ms = if lo == hi {
            lo
        } else {
            rand::thread_rng().gen_range(lo..=hi)
        };
        Duration::from_millis(ms)
    }
}

#[async_trait]
impl CounselorService for CounselorServiceImpl {
    async fn handle_message(&self, session_id: &str, text: &str) -> Result<MessageReceipt> {
        // 空白消息由 API 层拒绝，这里仅做最后防线
        if text.trim().is_empty() {
            return Err(AppError::Validation("message must not be empty".to_string()));
        }

        let session = self
            .store
            .get(session_id)
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", session_id)))?;

        if session.status == SessionStatus::Closed {
            return Err(AppError::SessionClosed(session_id.to_string()));
        }

        let message = self.store.append_message(session_id, text, Author::User)?;
        self.metrics.record_message();

        // 分类一次，复用结果做紧急迁移判定和回复渲染
        let intent = classify(text);

        let mut emergency_triggered = false;
        if intent == Intent::Emergency {
            emergency_triggered = self.store.mark_emergency(session_id).unwrap_or(false);
            if emergency_triggered {
                self.metrics.record_emergency();
                self.events.publish(
                    session_id,
                    kinds::EMERGENCY_ALERT,
                    serde_json::json!({ "message_seq": message.seq }),
                );
            }
        }

        if intent == Intent::Unclassified {
            self.metrics.record_fallback();
        }

        let reply = respond(intent, session.user_name.as_deref());
        let delay = self.sample_typing_delay();

        self.events.publish(
            session_id,
            kinds::TYPING_STARTED,
            serde_json::json!({ "delay_ms": delay.as_millis() as u64 }),
        );

        // 每条回复一个独立的延迟任务；会话重置/关闭时由存储层统一中止
        let store = self.store.clone();
        let events = self.events.clone();
        let metrics = self.metrics.clone();
        let session_id_owned = session_id.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match store.append_message(&session_id_owned, &reply, Author::Counselor) {
                Ok(delivered) => {
                    metrics.record_reply();
                    events.publish(
                        &session_id_owned,
                        kinds::REPLY,
                        serde_json::json!({
                            "seq": delivered.seq,
                            "text": delivered.text,
                        }),
                    );
                }
                Err(e) => {
                    debug!("Dropping counselor reply for {}: {}", session_id_owned, e);
                }
            }
        });
        self.store.add_pending_reply(session_id, handle);

        let emergency_active = self
            .store
            .get(session_id)
            .map(|s| s.is_emergency())
            .unwrap_or(false);

        Ok(MessageReceipt {
            message,
            reply_pending: true,
            emergency_active,
            emergency_triggered,
        })
    }
}

/// 创建辅导服务
pub fn create_counselor_service(
    store: Arc<SessionStore>,
    events: EventBus,
    metrics: Arc<AppMetrics>,
    config: CounselorConfig,
) -> Box<dyn CounselorService> {
    Box::new(CounselorServiceImpl::new(store, events, metrics, config))
}
