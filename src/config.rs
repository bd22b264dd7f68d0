use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 评分服务 API 地址
    pub api_base_url: String,
    /// 访问令牌（可选，作为 Bearer token 发送）
    pub api_token: Option<String>,
    /// 单个请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 日志过滤规则，未设置时根据 verbose_logging 决定
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            api_token: None,
            request_timeout_secs: 30,
            verbose_logging: false,
            log_filter: None,
        }
    }
}

impl Config {
    /// 默认配置加环境变量覆盖
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> AppResult<Self> {
        let request_timeout_secs = match std::env::var("SCORING_REQUEST_TIMEOUT_SECS") {
            Ok(v) => v.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "SCORING_REQUEST_TIMEOUT_SECS".to_string(),
                value: v.clone(),
                expected_type: "u64".to_string(),
            })?,
            Err(_) => self.request_timeout_secs,
        };

        Ok(Self {
            api_base_url: std::env::var("SCORING_API_BASE_URL").unwrap_or(self.api_base_url),
            api_token: std::env::var("SCORING_API_TOKEN").ok().or(self.api_token),
            request_timeout_secs,
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
            log_filter: std::env::var("RUST_LOG").ok().or(self.log_filter),
        })
    }

    /// 加载配置：若设置了 SCORING_CONFIG 则先读取该文件，再应用环境变量
    pub fn load() -> AppResult<Self> {
        match std::env::var("SCORING_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?.with_env_overrides(),
            Err(_) => Self::from_env(),
        }
    }
}
