//! 会话服务
//!
//! 提供会话的生命周期管理与内存态存储：创建、查询、重置、关闭。
//! 每个会话条目独占自己的对话记录、紧急标志与待定回复任务句柄；
//! 重置与关闭会中止所有未触发的延迟回复，避免回复落入失效会话。

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::error::{AppError, Result};
use crate::models::message::{Author, ChatMessage};
use crate::models::session::{ChatSession, SessionStatus};

/// 分页参数
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Pagination {
    /// 页码（从 1 开始）
    pub page: usize,
    /// 每页数量
    pub page_size: usize,
}

impl Pagination {
    /// 创建新分页参数
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// 计算偏移量
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1)) * self.page_size
    }

    /// 检查分页参数是否有效
    pub fn is_valid(&self) -> bool {
        self.page > 0 && self.page_size > 0
    }
}

/// 会话存储条目
struct SessionEntry {
    session: ChatSession,
    transcript: Vec<ChatMessage>,
    /// 会话内单调递增的消息序号（对话记录裁剪后仍保持递增）
    next_seq: u64,
    /// 未触发的延迟回复任务句柄
    pending_replies: Vec<JoinHandle<()>>,
}

impl SessionEntry {
    fn new(session: ChatSession) -> Self {
        Self {
            session,
            transcript: Vec::new(),
            next_seq: 1,
            pending_replies: Vec::new(),
        }
    }

    fn abort_pending(&mut self) {
        for handle in self.pending_replies.drain(..) {
            handle.abort();
        }
    }

    fn prune_finished(&mut self) {
        self.pending_replies.retain(|handle| !handle.is_finished());
    }
}

/// 内存态会话存储
///
/// 以会话 ID 为键的 DashMap，所有操作只锁单个条目。
pub struct SessionStore {
    entries: DashMap<String, SessionEntry>,
    /// 单会话保留的最大消息条数（0 表示无限制），超出时丢弃最旧消息
    max_transcript_len: usize,
}

impl SessionStore {
    /// 创建新存储
    pub fn new(max_transcript_len: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_transcript_len,
        }
    }

    /// 插入新会话
    pub fn insert(&self, session: ChatSession) {
        self.entries
            .insert(session.id.clone(), SessionEntry::new(session));
    }

    /// 按 ID 获取会话快照
    pub fn get(&self, id: &str) -> Option<ChatSession> {
        self.entries.get(id).map(|entry| entry.session.clone())
    }

    /// 列出会话快照（按创建时间排序）
    pub fn list(&self, offset: usize, limit: usize) -> Vec<ChatSession> {
        let mut sessions: Vec<ChatSession> = self
            .entries
            .iter()
            .map(|entry| entry.session.clone())
            .collect();
        sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        sessions.into_iter().skip(offset).take(limit).collect()
    }

    /// 会话总数
    pub fn count(&self) -> u64 {
        self.entries.len() as u64
    }

    /// 追加消息到对话记录
    pub fn append_message(&self, id: &str, text: &str, author: Author) -> Result<ChatMessage> {
        let mut entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))?;

        if entry.session.status == SessionStatus::Closed {
            return Err(AppError::SessionClosed(id.to_string()));
        }

        let seq = entry.next_seq;
        entry.next_seq += 1;

        let message = ChatMessage::new(id, seq, text, author);
        entry.transcript.push(message.clone());

        if self.max_transcript_len > 0 && entry.transcript.len() > self.max_transcript_len {
            entry.transcript.remove(0);
        }

        match author {
            Author::User => entry.session.stats.user_messages += 1,
            Author::Counselor => entry.session.stats.counselor_messages += 1,
        }
        entry.session.touch();

        Ok(message)
    }

    /// 获取对话记录快照
    pub fn transcript(&self, id: &str) -> Option<Vec<ChatMessage>> {
        self.entries.get(id).map(|entry| entry.transcript.clone())
    }

    /// 标记紧急模式，返回本次调用是否触发了状态迁移
    pub fn mark_emergency(&self, id: &str) -> Option<bool> {
        self.entries
            .get_mut(id)
            .map(|mut entry| entry.session.enter_emergency())
    }

    /// 登记待定回复任务句柄，顺带清理已完成的句柄
    pub fn add_pending_reply(&self, id: &str, handle: JoinHandle<()>) {
        if let Some(mut entry) = self.entries.get_mut(id) {
            entry.prune_finished();
            entry.pending_replies.push(handle);
        } else {
            // 会话在排定与登记之间被删除，直接取消任务
            handle.abort();
        }
    }

    /// 重置会话：中止待定回复，清空对话记录，清除紧急模式
    pub fn reset(&self, id: &str) -> Option<ChatSession> {
        self.entries.get_mut(id).map(|mut entry| {
            entry.abort_pending();
            entry.transcript.clear();
            entry.next_seq = 1;
            entry.session.reset();
            entry.session.status = SessionStatus::Active;
            entry.session.clone()
        })
    }

    /// 关闭会话：中止待定回复，丢弃对话记录，保留墓碑条目
    pub fn close(&self, id: &str) -> Option<ChatSession> {
        self.entries.get_mut(id).map(|mut entry| {
            entry.abort_pending();
            entry.transcript.clear();
            entry.session.status = SessionStatus::Closed;
            entry.session.touch();
            entry.session.clone()
        })
    }
}

/// 会话服务 trait
#[async_trait]
pub trait SessionService: Send + Sync {
    /// 创建会话
    async fn create(&self, user_name: Option<&str>) -> Result<ChatSession>;

    /// 根据 ID 获取会话
    async fn get_by_id(&self, id: &str) -> Result<Option<ChatSession>>;

    /// 列出会话
    async fn list(&self, pagination: Pagination) -> Result<Vec<ChatSession>>;

    /// 统计会话数量
    async fn count(&self) -> Result<u64>;

    /// 获取对话记录
    async fn transcript(&self, id: &str) -> Result<Vec<ChatMessage>>;

    /// 重置会话（对话框关闭后重开的服务端等价物）
    async fn reset(&self, id: &str) -> Result<ChatSession>;

    /// 关闭会话
    async fn close(&self, id: &str) -> Result<ChatSession>;
}

/// 会话服务实现
pub struct SessionServiceImpl {
    store: Arc<SessionStore>,
}

impl SessionServiceImpl {
    /// 创建新的服务实例
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionService for SessionServiceImpl {
    async fn create(&self, user_name: Option<&str>) -> Result<ChatSession> {
        let session = ChatSession::new(user_name);
        self.store.insert(session.clone());
        Ok(session)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<ChatSession>> {
        Ok(self.store.get(id))
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<ChatSession>> {
        if !pagination.is_valid() {
            return Err(AppError::Validation(
                "page and page_size must be greater than 0".to_string(),
            ));
        }
        Ok(self.store.list(pagination.offset(), pagination.page_size))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.store.count())
    }

    async fn transcript(&self, id: &str) -> Result<Vec<ChatMessage>> {
        self.store
            .transcript(id)
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))
    }

    async fn reset(&self, id: &str) -> Result<ChatSession> {
        self.store
            .reset(id)
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))
    }

    async fn close(&self, id: &str) -> Result<ChatSession> {
        self.store
            .close(id)
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))
    }
}

/// 创建会话服务
pub fn create_session_service(store: Arc<SessionStore>) -> Box<dyn SessionService> {
    Box::new(SessionServiceImpl::new(store))
}
