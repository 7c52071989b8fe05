//! Routes 模块
//!
//! 定义 API 路由。

pub mod earnings_routes;
pub mod message_routes;
pub mod session_routes;
