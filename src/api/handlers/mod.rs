//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod earnings_handler;
pub mod message_handler;
pub mod session_handler;

pub use earnings_handler::*;
pub use message_handler::*;
pub use session_handler::*;
