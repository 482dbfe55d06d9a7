use super::Route;
use crate::storage::TokenStore;
use std::fmt;

/// 首页：已登录时进入题目列表，否则申请令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    pub has_token: bool,
}

impl HomePage {
    pub fn new(tokens: &TokenStore) -> Self {
        Self {
            has_token: tokens.has_token(),
        }
    }

    pub fn next_route(&self) -> Route {
        if self.has_token {
            Route::Questions
        } else {
            Route::TokenRequest
        }
    }
}

impl fmt::Display for HomePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Welcome to QuestionTime")?;
        writeln!(f, "A platform for asking and managing questions.")?;
        let link = if self.has_token {
            "Go to Questions"
        } else {
            "Request Token"
        };
        write!(f, "[{}] -> {}", link, self.next_route())
    }
}
