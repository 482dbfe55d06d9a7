//! 令牌申请页

use super::Route;
use crate::error::StorageError;
use crate::services::AuthService;
use crate::storage::TokenStore;
use regex::Regex;
use std::sync::LazyLock;
use tracing::info;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter your email to receive your token";
pub const TOKEN_FAILURE_MESSAGE: &str = "Failed to retrieve token. Please try again.";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// 粗略的邮箱格式检查
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

pub struct TokenRequestPage {
    auth: AuthService,
    tokens: TokenStore,
    message: Option<String>,
}

impl TokenRequestPage {
    pub fn new(auth: AuthService, tokens: TokenStore) -> Self {
        Self {
            auth,
            tokens,
            message: None,
        }
    }

    /// 页面上显示的提示
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// 提交邮箱
    ///
    /// # 返回
    /// 拿到令牌后返回要跳转的页面（首页）；否则返回 `None`，提示写在 `message()`
    pub async fn submit(&mut self, email: &str) -> Result<Option<Route>, StorageError> {
        self.message = None;

        if !is_valid_email(email) {
            self.message = Some(INVALID_EMAIL_MESSAGE.to_string());
            return Ok(None);
        }

        match self.auth.request_token(email.trim()).await {
            Some(token) => {
                self.tokens.set_token(&token)?;
                info!("✓ 令牌已保存");
                Ok(Some(Route::Home))
            }
            None => {
                self.message = Some(TOKEN_FAILURE_MESSAGE.to_string());
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EMAIL_REGEX.is_some());
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email(" test@example.com "));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn test_invalid_email_shows_message_without_request() {
        let tokens = TokenStore::in_memory();
        let auth = AuthService::new(reqwest::Client::new(), "http://127.0.0.1:1");
        let mut page = TokenRequestPage::new(auth, tokens.clone());

        let route = page.submit("invalid").await.unwrap();
        assert_eq!(route, None);
        assert_eq!(page.message(), Some(INVALID_EMAIL_MESSAGE));
        assert!(!tokens.has_token());
    }
}
