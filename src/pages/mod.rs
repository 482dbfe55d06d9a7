//! 页面外壳：路由、登录守卫、首页和令牌申请页

pub mod home;
pub mod route;
pub mod token_request;

pub use home::HomePage;
pub use route::{guard, Route};
pub use token_request::TokenRequestPage;
