/// 题库 API 客户端
///
/// 每个页面组件持有一个自己的实例，实例内记录最近一次请求的 `data` / `error` / `is_loading`。
/// 每次请求都会重新读取令牌存储，有令牌时附加 `Token` 请求头。
use crate::config::Config;
use crate::error::ApiError;
use crate::storage::TokenStore;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// 携带登录令牌的请求头
pub const TOKEN_HEADER: &str = "token";

/// 请求状态快照
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub is_loading: bool,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
        }
    }
}

/// 带状态的 API 客户端
///
/// 同一实例上的并发请求共享状态，后完成的请求覆盖先完成的结果，不做取消或去重。
pub struct ApiClient<T> {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
    state: Mutex<RequestState<T>>,
}

impl<T> ApiClient<T>
where
    T: DeserializeOwned + Clone,
{
    /// 创建新的 API 客户端
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, tokens: TokenStore) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            tokens,
            state: Mutex::new(RequestState::default()),
        }
    }

    /// 使用配置中的服务地址创建
    pub fn from_config(config: &Config, tokens: TokenStore) -> Self {
        Self::new(reqwest::Client::new(), config.api_base_url.clone(), tokens)
    }

    /// 设置初始数据
    pub fn with_initial_data(self, data: T) -> Self {
        self.lock_state().data = Some(data);
        self
    }

    /// 发送请求
    ///
    /// # 参数
    /// - `endpoint`: 以 `/` 开头的接口路径
    /// - `method`: HTTP 方法
    /// - `body`: 请求体（JSON），没有时传 `None`
    /// - `extra_headers`: 额外请求头，同名时会被 `Token` 覆盖
    ///
    /// # 返回
    /// 返回解析后的响应体；失败时错误同时保存在状态里
    pub async fn request<B>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&B>,
        extra_headers: HeaderMap,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.begin();
        let result = match self.execute(endpoint, method, body, extra_headers).await {
            Ok(bytes) => decode_body(endpoint, &bytes),
            Err(e) => Err(e),
        };
        self.finish(endpoint, result, |state, data| state.data = Some(data.clone()))
    }

    /// 发送 `GET` 请求
    pub async fn get(&self, endpoint: &str) -> Result<T, ApiError> {
        self.send(endpoint, Method::GET).await
    }

    /// 发送不带请求体的请求
    pub async fn send(&self, endpoint: &str, method: Method) -> Result<T, ApiError> {
        self.request::<()>(endpoint, method, None, HeaderMap::new())
            .await
    }

    /// 发送请求，只看状态码
    ///
    /// 2xx 即成功，响应体不解析，`data` 保持不变；`is_loading` 和 `error` 照常更新。
    pub async fn send_ignoring_body(&self, endpoint: &str, method: Method) -> Result<(), ApiError> {
        self.begin();
        let result = self
            .execute::<()>(endpoint, method, None, HeaderMap::new())
            .await
            .map(|_| ());
        self.finish(endpoint, result, |_, _| {})
    }

    /// 发送带 JSON 请求体的请求
    pub async fn send_json<B>(&self, endpoint: &str, method: Method, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.request(endpoint, method, Some(body), HeaderMap::new())
            .await
    }

    pub fn state(&self) -> RequestState<T> {
        self.lock_state().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock_state().data.clone()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.lock_state().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading
    }

    fn begin(&self) {
        let mut state = self.lock_state();
        state.is_loading = true;
        state.error = None;
    }

    fn finish<R>(
        &self,
        endpoint: &str,
        result: Result<R, ApiError>,
        store: impl FnOnce(&mut RequestState<T>, &R),
    ) -> Result<R, ApiError> {
        let mut state = self.lock_state();
        state.is_loading = false;
        match result {
            Ok(data) => {
                store(&mut *state, &data);
                Ok(data)
            }
            Err(e) => {
                warn!("⚠️ 请求失败 ({}): {}", endpoint, e);
                state.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// 发出请求并检查状态码，返回原始响应体
    async fn execute<B>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&B>,
        extra_headers: HeaderMap,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let headers = self.build_headers(extra_headers)?;

        debug!("{} {}", method, url);

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let network_error = |e: reqwest::Error| ApiError::Network {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        };

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }

    fn build_headers(&self, extra_headers: HeaderMap) -> Result<HeaderMap, ApiError> {
        let mut headers = extra_headers;
        if let Some(token) = self.tokens.token() {
            let value = HeaderValue::from_str(&token).map_err(|e| ApiError::InvalidToken {
                message: e.to_string(),
            })?;
            headers.insert(HeaderName::from_static(TOKEN_HEADER), value);
        }
        Ok(headers)
    }

    fn lock_state(&self) -> MutexGuard<'_, RequestState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 解析 2xx 响应体
///
/// 空响应体按 JSON `null` 处理；不是 JSON 的响应体按原始文本（JSON 字符串）再试一次，
/// 目标类型接受字符串（如 `serde_json::Value`）时照常成功。
fn decode_body<T: DeserializeOwned>(endpoint: &str, bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"null").map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        });
    }

    serde_json::from_slice(bytes).or_else(|e| {
        let text = Value::String(String::from_utf8_lossy(bytes).into_owned());
        serde_json::from_value(text).map_err(|_| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionCollection;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client(server: &MockServer, tokens: TokenStore) -> ApiClient<Value> {
        ApiClient::new(reqwest::Client::new(), server.uri(), tokens)
    }

    #[test]
    fn test_initial_state() {
        let api: ApiClient<Value> =
            ApiClient::new(reqwest::Client::new(), "http://unused", TokenStore::in_memory());
        let state = api.state();
        assert_eq!(state.data, None);
        assert_eq!(state.error, None);
        assert!(!state.is_loading);

        let api = api.with_initial_data(json!([]));
        assert_eq!(api.data(), Some(json!([])));
    }

    #[tokio::test]
    async fn test_successful_request_stores_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Test"})))
            .mount(&server)
            .await;

        let api = client(&server, TokenStore::in_memory());
        let data = assert_ok!(api.get("/test").await);

        assert_eq!(data, json!({"id": 1, "name": "Test"}));
        assert_eq!(api.data(), Some(data));
        assert!(!api.is_loading());
        assert_eq!(api.error(), None);
    }

    #[tokio::test]
    async fn test_token_header_present_when_stored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/test"))
            .and(header("Token", "fake-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = TokenStore::in_memory();
        tokens.set_token("fake-token").unwrap();

        let api = client(&server, tokens);
        assert_ok!(api.get("/test").await);
    }

    #[tokio::test]
    async fn test_token_header_absent_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/test"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let api = client(&server, TokenStore::in_memory());
        let data = assert_ok!(api.get("/test").await);
        assert_eq!(data, Value::Null);

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("token"));
    }

    #[tokio::test]
    async fn test_token_overrides_extra_header_and_body_is_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/questions"))
            .and(header("Token", "stored"))
            .and(header("X-Trace", "1"))
            .and(body_json(json!({"question": "Q?", "options": ["a", "b"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "-N1"})))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = TokenStore::in_memory();
        tokens.set_token("stored").unwrap();

        let mut extra = HeaderMap::new();
        extra.insert(HeaderName::from_static(TOKEN_HEADER), HeaderValue::from_static("ignored"));
        extra.insert("x-trace", HeaderValue::from_static("1"));

        let api = client(&server, tokens);
        let body = json!({"question": "Q?", "options": ["a", "b"]});
        assert_ok!(api.request("/questions", Method::POST, Some(&body), extra).await);
    }

    #[tokio::test]
    async fn test_error_status_is_stored_and_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/test"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let api = client(&server, TokenStore::in_memory());
        let err = assert_err!(api.get("/test").await);

        assert_eq!(err.status(), Some(500));
        assert_eq!(api.error(), Some(err));
        assert!(!api.is_loading());
        assert_eq!(api.data(), None);
    }

    #[tokio::test]
    async fn test_network_error() {
        // 端口 1 上没有服务
        let api: ApiClient<Value> =
            ApiClient::new(reqwest::Client::new(), "http://127.0.0.1:1", TokenStore::in_memory());

        let err = assert_err!(api.get("/test").await);
        assert!(matches!(err, ApiError::Network { .. }));
        assert_eq!(err.to_string(), "Network Error");
        assert!(!api.is_loading());
    }

    #[tokio::test]
    async fn test_new_request_clears_previous_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fail"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
            .mount(&server)
            .await;

        let api = client(&server, TokenStore::in_memory());
        assert_err!(api.get("/fail").await);
        assert!(api.error().is_some());

        assert_ok!(api.get("/ok").await);
        assert_eq!(api.error(), None);
        assert_eq!(api.data(), Some(json!(1)));
    }

    #[tokio::test]
    async fn test_text_body_is_kept_as_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/questions"))
            .respond_with(ResponseTemplate::new(201).set_body_string("Created"))
            .mount(&server)
            .await;

        let api = client(&server, TokenStore::in_memory());
        let data = assert_ok!(api.send_json("/questions", Method::POST, &json!({})).await);
        assert_eq!(data, json!("Created"));
        assert_eq!(api.error(), None);
    }

    #[tokio::test]
    async fn test_text_body_is_error_for_structured_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/questions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let api: ApiClient<QuestionCollection> =
            ApiClient::new(reqwest::Client::new(), server.uri(), TokenStore::in_memory());
        let err = assert_err!(api.get("/questions").await);
        assert!(matches!(err, ApiError::Decode { .. }));
        assert_eq!(api.error(), Some(err));
    }

    #[tokio::test]
    async fn test_send_ignoring_body_keeps_data() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/questions/q1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/questions/q2"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api: ApiClient<QuestionCollection> =
            ApiClient::new(reqwest::Client::new(), server.uri(), TokenStore::in_memory())
                .with_initial_data(QuestionCollection::new());

        assert_ok!(api.send_ignoring_body("/questions/q1", Method::DELETE).await);
        assert_eq!(api.error(), None);
        assert_eq!(api.data(), Some(QuestionCollection::new()));

        let err = assert_err!(api.send_ignoring_body("/questions/q2", Method::DELETE).await);
        assert_eq!(err.status(), Some(403));
        assert_eq!(api.error(), Some(err));
        assert!(!api.is_loading());
    }

    #[tokio::test]
    async fn test_overlapping_requests_last_completion_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!("slow"))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("fast")))
            .mount(&server)
            .await;

        let api = client(&server, TokenStore::in_memory());
        let (slow, fast) = tokio::join!(api.get("/slow"), api.get("/fast"));

        assert_eq!(assert_ok!(slow), json!("slow"));
        assert_eq!(assert_ok!(fast), json!("fast"));
        // 慢请求后完成，覆盖快请求的结果
        assert_eq!(api.data(), Some(json!("slow")));
        assert!(!api.is_loading());
    }
}
