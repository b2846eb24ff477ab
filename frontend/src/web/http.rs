//! 浏览器 HTTP 客户端
//!
//! 用 `gloo-net` 实现 core crate 的 `HttpClient` trait。

use gloo_net::http::{Request, RequestBuilder};
use stockroom::error::{ApiError, ApiResult};
use stockroom::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

#[derive(Clone, Copy, Default)]
pub struct BrowserHttpClient;

fn request_builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = request_builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match &req.body {
            Some(body) => builder
                .header("Content-Type", body.content_type())
                .body(body.as_str().to_string()),
            None => builder.build(),
        }
        .map_err(|e| ApiError::transport(format!("failed to build request: {e}")))?;

        // fetch 只在网络层失败时 reject，非 2xx 仍是正常响应
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("failed to read body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}
