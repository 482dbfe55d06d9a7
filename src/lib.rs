//! # QuestionTime
//!
//! 选择题管理客户端：用邮箱申请令牌，然后对远程题库服务增删改查题目。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层
//! - `storage/` - 令牌存储（`qt_token` 和 `currentQuestion` 两个键）
//! - `clients/` - `ApiClient`，带 `data` / `error` / `is_loading` 状态的请求封装，自动附加 `Token` 请求头
//!
//! ### ② 业务能力层
//! - `services/` - `AuthService`，申请令牌，失败只记日志
//!
//! ### ③ 页面组件层
//! - `views/` - 新增/编辑表单、题目列表、删除确认框、提示消息
//!
//! ### ④ 页面层
//! - `pages/` - 路由、登录守卫、首页和令牌申请页
//! - `app` - 把命令行命令分派到页面
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod services;
pub mod storage;
pub mod utils;
pub mod views;

// 重新导出常用类型
pub use app::App;
pub use clients::{ApiClient, RequestState};
pub use config::Config;
pub use error::{ApiError, AppError, AppResult};
pub use models::{Question, QuestionCollection};
pub use storage::TokenStore;
