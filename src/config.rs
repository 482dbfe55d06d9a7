use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// 远程题库服务地址（不带结尾的 `/`）
    pub api_base_url: String,
    /// 本地存储文件路径（保存令牌和当前编辑的题目）
    pub storage_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            storage_path: ".question_time/storage.json".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只从环境变量读取，缺省值来自 `Config::default()`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// 从 TOML 文件读取
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&content, &display)
    }

    /// 加载配置：先读配置文件（如果有），再用环境变量覆盖
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(p) => Self::from_toml_file(p)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let mut config = self;
        if let Ok(url) = std::env::var("QT_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(path) = std::env::var("QT_STORAGE_PATH") {
            config.storage_path = path;
        }
        if let Ok(value) = std::env::var("QT_VERBOSE_LOGGING") {
            config.verbose_logging =
                value
                    .parse()
                    .map_err(|_| ConfigError::EnvVarParseFailed {
                        var_name: "QT_VERBOSE_LOGGING".to_string(),
                        value: value.clone(),
                        expected_type: "bool".to_string(),
                    })?;
        }
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim_end_matches('/').len();
        self.api_base_url.truncate(trimmed);
        self
    }
}
