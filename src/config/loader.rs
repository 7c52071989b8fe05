use crate::config::config::{AppConfig, CounselorConfig};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use std::path::PathBuf;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. ./solace.toml
    /// 2. 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        let figment = Figment::new()
            .merge(Toml::file("solace.toml"))
            .merge(Env::prefixed("SOLACE_").split("_").global());

        figment.extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        let figment = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("SOLACE_").split("_").global());

        figment.extract()
    }

    /// 加载辅导引擎配置
    pub fn load_counselor_config() -> Result<CounselorConfig, figment::Error> {
        let figment = Figment::new()
            .merge(Toml::file("solace.toml"))
            .merge(Env::prefixed("SOLACE_COUNSELOR_").split("_").global());

        figment.extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.counselor.typing_delay_min_ms > config.counselor.typing_delay_max_ms {
            return Err(ConfigValidationError::InvalidTypingDelay);
        }

        if config.counselor.max_message_len == 0 {
            return Err(ConfigValidationError::InvalidMessageLen);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("打字延迟区间无效，下限不能大于上限")]
    InvalidTypingDelay,

    #[error("消息长度上限无效，必须大于 0")]
    InvalidMessageLen,

    #[error("配置路径无效: {0}")]
    InvalidPath(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("solace.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}
