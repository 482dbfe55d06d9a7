use crate::storage::TokenStore;
use std::fmt;
use tracing::debug;

/// 页面路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    TokenRequest,
    Questions,
    AddQuestion,
    EditQuestion { id: String },
}

impl Route {
    /// 从路径解析
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Home),
            "/token-request" => Some(Route::TokenRequest),
            "/questions" => Some(Route::Questions),
            "/add-question" => Some(Route::AddQuestion),
            _ => trimmed
                .strip_prefix("/questions/edit/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::EditQuestion { id: id.to_string() }),
        }
    }

    /// 需要登录令牌才能访问
    ///
    /// 只有题目列表页检查令牌；新增和编辑页直接发请求，由服务端拒绝未登录的请求。
    pub fn requires_token(&self) -> bool {
        matches!(self, Route::Questions)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::TokenRequest => write!(f, "/token-request"),
            Route::Questions => write!(f, "/questions"),
            Route::AddQuestion => write!(f, "/add-question"),
            Route::EditQuestion { id } => write!(f, "/questions/edit/{}", id),
        }
    }
}

/// 路由守卫：没有令牌时题目列表页重定向到首页
pub fn guard(route: Route, tokens: &TokenStore) -> Route {
    if route.requires_token() && !tokens.has_token() {
        debug!("未登录，{} 重定向到首页", route);
        return Route::Home;
    }
    route
}
