use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 远程 API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 本地存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API 调用错误
///
/// 该错误既要保存在请求状态里，又要返回给调用方，所以只保存字符串信息并实现 `Clone`。
/// `Display` 文本会直接显示在页面上。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 网络请求失败（没有收到响应）
    #[error("Network Error")]
    Network { endpoint: String, message: String },
    /// 服务端返回非 2xx 状态码
    #[error("Request failed with status code {status}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应体无法解析
    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    /// 令牌无法作为请求头发送
    #[error("Invalid token header: {message}")]
    InvalidToken { message: String },
}

impl ApiError {
    /// 出错的接口路径
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::Network { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => Some(endpoint),
            ApiError::InvalidToken { .. } => None,
        }
    }

    /// HTTP 状态码（仅服务端错误响应）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取存储文件失败
    #[error("读取存储文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入存储文件失败
    #[error("写入存储文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 存储内容不是合法的 JSON
    #[error("存储内容解析失败 ({path}): {source}")]
    Corrupted {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 序列化存储值失败
    #[error("序列化键 {key} 失败: {source}")]
    SerializeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
