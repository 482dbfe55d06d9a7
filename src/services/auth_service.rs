/// 令牌申请服务
///
/// 用邮箱向服务端申请登录令牌。失败时只记录日志，返回 `None`，不向页面抛错。
use crate::config::Config;
use crate::models::{TokenRequest, TokenResponse};
use tracing::{error, info};

pub struct AuthService {
    http: reqwest::Client,
    base_url: String,
}

impl AuthService {
    /// 创建新的令牌申请服务
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(reqwest::Client::new(), config.api_base_url.clone())
    }

    /// 申请令牌
    ///
    /// # 参数
    /// - `email`: 接收令牌的邮箱
    ///
    /// # 返回
    /// 成功时返回令牌，任何失败都返回 `None`
    pub async fn request_token(&self, email: &str) -> Option<String> {
        let url = format!("{}/token", self.base_url);
        let payload = TokenRequest { email };

        let response = match self.http.post(&url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_request() || e.is_connect() || e.is_timeout() {
                    error!("未收到响应: {}", e);
                } else {
                    error!("请求错误: {}", e);
                }
                error!("请求配置: POST {} email={}", url, email);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            error!("错误响应内容: {}", body);
            error!("错误状态码: {}", status.as_u16());
            error!("错误响应头: {:?}", headers);
            error!("请求配置: POST {} email={}", url, email);
            return None;
        }

        match response.json::<TokenResponse>().await {
            Ok(body) => {
                info!("✓ 令牌申请成功");
                Some(body.token)
            }
            Err(e) => {
                error!("令牌响应解析失败: {}", e);
                None
            }
        }
    }
}
