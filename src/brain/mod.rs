//! 辅导引擎核心模块
//!
//! 基于规则的会话回复引擎：对用户消息做确定性的意图分类
//! （危机 / 情绪状态 / 基础对话 / 知识库主题 / 认知边界 / 导航），
//! 并返回对应类别的固定回复，无命中时回退到伪随机兜底回复。
//!
//! 所有分类与回复生成均为同步纯函数，无 I/O、无共享状态。

pub mod basic;
pub mod emergency;
pub mod emotion;
pub mod knowledge;
pub mod responder;
pub mod topic;

pub use basic::{BasicQuestion, classify_basic_question};
pub use emergency::is_emergency;
pub use emotion::{EmotionalState, classify_emotion};
pub use responder::{
    CRISIS_RESPONSE, FALLBACK_RESPONSES, Intent, LIMITATIONS_RESPONSE, classify,
    generate_response, respond,
};
pub use topic::classify_topic;
