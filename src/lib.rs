//! Solace - 数字辅导员服务
//!
//! 为心理健康平台提供基于规则的对话辅导能力：意图分类、预置回复、
//! 紧急模式升级与模拟打字延迟，外加面向咨询师的收入统计。

pub mod api;
pub mod brain;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
pub mod websocket;
