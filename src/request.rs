use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub use stockroom_shared::protocol::HttpMethod;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Encoded request body with its content type
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(String),
    Form(String),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => CONTENT_TYPE_JSON,
            RequestBody::Form(_) => CONTENT_TYPE_FORM,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestBody::Json(s) | RequestBody::Form(s) => s,
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json<T: serde::Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        let encoded = serde_json::to_string(body)?;
        self.body = Some(RequestBody::Json(encoded));
        Ok(self)
    }

    pub fn with_form<T: serde::Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        let encoded =
            serde_urlencoded::to_string(body).map_err(|e| ApiError::decode(e.to_string()))?;
        self.body = Some(RequestBody::Form(encoded));
        Ok(self)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body. An empty body (204) decodes as JSON `null`, so `()`
    /// and `Option<_>` responses work.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        Ok(serde_json::from_str(text)?)
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器里的 fetch future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// Resolve with any status the server sent. Only a missing response is an
    /// error here, reported as `ApiErrorKind::Transport`.
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 实现层: Mock 客户端 (Tests)
// =========================================================

/// Canned responses keyed by `METHOD url`.
///
/// Queued responses are served first-in first-out; once a key's queue is
/// drained the fixed response (if any) repeats. Unknown keys get a 404.
#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    queued: RefCell<HashMap<String, VecDeque<MockReply>>>,
    fixed: RefCell<HashMap<String, MockReply>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
#[derive(Clone)]
enum MockReply {
    Response(u16, String),
    Offline,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    /// Always answer `method url` with this status and JSON body
    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.fixed
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::Response(status, body.to_string()));
    }

    /// Answer `method url` with a raw body (e.g. empty 204)
    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.fixed
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::Response(status, body.to_string()));
    }

    /// Answer the next call to `method url` only
    pub fn enqueue(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.queued
            .borrow_mut()
            .entry(Self::key(method, url))
            .or_default()
            .push_back(MockReply::Response(status, body.to_string()));
    }

    /// Simulate a dropped connection for `method url`
    pub fn mock_offline(&self, method: HttpMethod, url: &str) {
        self.fixed
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::Offline);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn calls_to(&self, method: HttpMethod, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let key = Self::key(req.method, &req.url);
        self.requests.borrow_mut().push(req);

        let queued = self
            .queued
            .borrow_mut()
            .get_mut(&key)
            .and_then(|q| q.pop_front());
        let reply = queued.or_else(|| self.fixed.borrow().get(&key).cloned());

        match reply {
            Some(MockReply::Response(status, body)) => Ok(HttpResponse { status, body }),
            Some(MockReply::Offline) => Err(ApiError::transport("connection refused")),
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"detail":"Not Found"}"#.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_decodes_as_unit() {
        let resp = HttpResponse { status: 204, body: String::new() };
        assert!(resp.is_success());
        let decoded: serde_json::Result<()> = serde_json::from_str("null");
        assert!(decoded.is_ok());
        resp.json::<()>().unwrap();
    }

    #[test]
    fn form_body_is_url_encoded() {
        let req = HttpRequest::new("http://x/login/token", HttpMethod::Post)
            .with_form(&[("username", "a@b.c"), ("password", "p w")])
            .unwrap();
        let body = req.body.unwrap();
        assert_eq!(body.content_type(), CONTENT_TYPE_FORM);
        assert_eq!(body.as_str(), "username=a%40b.c&password=p+w");
    }

    #[tokio::test]
    async fn mock_serves_queue_then_fixed_then_404() {
        let client = MockHttpClient::new();
        let url = "http://x/products/";
        client.enqueue(HttpMethod::Get, url, 500, json!({"detail": "boom"}));
        client.mock_response(HttpMethod::Get, url, 200, json!([]));

        let first = client.send(HttpRequest::new(url, HttpMethod::Get)).await.unwrap();
        let second = client.send(HttpRequest::new(url, HttpMethod::Get)).await.unwrap();
        let other = client.send(HttpRequest::new(url, HttpMethod::Post)).await.unwrap();

        assert_eq!(first.status, 500);
        assert_eq!(second.status, 200);
        assert_eq!(other.status, 404);
        assert_eq!(client.calls_to(HttpMethod::Get, url), 2);
    }
}
