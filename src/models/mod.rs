//! 核心数据模型模块
//!
//! 定义 Solace 的核心数据结构：ChatSession, ChatMessage, PaymentRecord。

pub mod message;
pub mod payment;
pub mod session;

pub use message::{Author, ChatMessage};
pub use payment::{PaymentMethod, PaymentRecord, SessionType};
pub use session::{ChatSession, EmergencyMode, SessionStatus};
