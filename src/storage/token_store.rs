//! 令牌存储
//!
//! 只管理两个键：登录令牌 `qt_token`，以及从列表页带到编辑页的 `currentQuestion`。

use super::backends::{MemoryStorage, Storage};
use crate::error::StorageError;
use crate::models::Question;
use std::sync::Arc;
use tracing::warn;

/// 登录令牌的存储键
pub const TOKEN_KEY: &str = "qt_token";
/// 当前编辑题目的存储键
pub const CURRENT_QUESTION_KEY: &str = "currentQuestion";

/// 令牌存储
///
/// 可以随意克隆，所有克隆共享同一个后端。
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 内存存储，测试和一次性会话使用
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// 读取登录令牌
    ///
    /// 空字符串视为没有令牌；读取失败时记录警告并按没有令牌处理。
    pub fn token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("⚠️ 读取令牌失败: {}", e);
                None
            }
        }
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)
    }

    /// 读取缓存的当前题目
    ///
    /// 不存在或内容无法解析时返回 `None`。
    pub fn current_question(&self) -> Option<Question> {
        let raw = match self.storage.get_item(CURRENT_QUESTION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("⚠️ 读取当前题目失败: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(question) => Some(question),
            Err(e) => {
                warn!("⚠️ 当前题目数据无法解析: {}", e);
                None
            }
        }
    }

    pub fn set_current_question(&self, question: &Question) -> Result<(), StorageError> {
        let raw = serde_json::to_string(question).map_err(|source| StorageError::SerializeFailed {
            key: CURRENT_QUESTION_KEY.to_string(),
            source,
        })?;
        self.storage.set_item(CURRENT_QUESTION_KEY, &raw)
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.has_token())
            .finish()
    }
}
