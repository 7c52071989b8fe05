use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// 最大请求体大小（字节）
    pub max_request_size: usize,
}

/// 辅导引擎配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CounselorConfig {
    /// 模拟打字延迟下限（毫秒）
    pub typing_delay_min_ms: u64,
    /// 模拟打字延迟上限（毫秒）
    pub typing_delay_max_ms: u64,
    /// 单条消息最大长度（字符数，超出则拒绝）
    pub max_message_len: usize,
    /// 单个会话保留的最大消息条数（0 表示无限制）
    pub max_transcript_len: usize,
}

/// 会话管理配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// 事件广播通道容量
    pub event_channel_capacity: usize,
    /// 列表查询默认分页大小
    pub default_page_size: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件路径
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 辅导引擎配置
    pub counselor: CounselorConfig,
    /// 会话管理配置
    pub session: SessionConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 30,
                max_request_size: 1024 * 1024,
            },
            counselor: CounselorConfig {
                typing_delay_min_ms: 1000,
                typing_delay_max_ms: 3000,
                max_message_len: 4000,
                max_transcript_len: 500,
            },
            session: SessionConfig {
                event_channel_capacity: 256,
                default_page_size: 20,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: true,
                log_dir: Some(PathBuf::from("./logs")),
            },
            app_name: "solace".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config
    }

    /// 创建测试配置（打字延迟为零，事件即时可见）
    pub fn test() -> Self {
        let mut config = Self::development();
        config.environment = "test".into();
        config.counselor.typing_delay_min_ms = 0;
        config.counselor.typing_delay_max_ms = 0;
        config
    }
}
