use std::fmt;

use serde::Deserialize;

// =========================================================
// 错误类型枚举
// =========================================================

/// Where a failure came from. Drives which message a page or dialog shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Caught client-side; never reached the network
    Validation,
    /// Backend answered with a non-2xx status
    Rejected { status: u16 },
    /// No response (network down, CORS, DNS)
    Transport,
    /// 2xx body did not match the expected shape
    Decode,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Validation => "VALIDATION",
            ApiErrorKind::Rejected { .. } => "REJECTED",
            ApiErrorKind::Transport => "TRANSPORT",
            ApiErrorKind::Decode => "DECODE",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// Client-side error
///
/// - kind: 错误语义
/// - message: 错误消息（后端 `detail` 原文，或本地校验消息）
/// - spans: 操作追踪，如 `products.list`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    spans: Vec<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    /// Build a rejection from a non-2xx response, preferring the backend's
    /// `detail` field over the raw body.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = detail_message(body).unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("request failed with status {status}")
            } else {
                trimmed.to_string()
            }
        });
        Self::new(ApiErrorKind::Rejected { status }, message)
    }

    /// 添加操作追踪
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(operation.into());
        self
    }

    pub fn spans(&self) -> &[String] {
        &self.spans
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Rejected { status } => Some(status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ApiErrorKind::Validation
    }

    /// Message for an inline form error: validation text verbatim, anything
    /// else replaced by the dialog's generic failure text.
    pub fn user_message(&self, fallback: &str) -> String {
        if self.is_validation() {
            self.message.clone()
        } else {
            fallback.to_string()
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.error_code(), self.message)?;
        if let ApiErrorKind::Rejected { status } = self.kind {
            write!(f, " (HTTP {status})")?;
        }
        if !self.spans.is_empty() {
            write!(f, " | trace: {}", self.spans.join(" -> "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

// =========================================================
// 后端错误体
// =========================================================

/// FastAPI error body. `detail` is a string for `HTTPException`, or a list of
/// `{ msg, .. }` objects for request validation failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Items(Vec<DetailItem>),
}

#[derive(Deserialize)]
struct DetailItem {
    msg: String,
}

fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Detail::Text(text) => Some(text),
        Detail::Items(items) if !items.is_empty() => Some(
            items
                .into_iter()
                .map(|i| i.msg)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Detail::Items(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_prefers_detail_text() {
        let err = ApiError::rejected(401, r#"{"detail":"Incorrect email or password"}"#);
        assert_eq!(err.kind, ApiErrorKind::Rejected { status: 401 });
        assert_eq!(err.message, "Incorrect email or password");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn rejected_joins_validation_items() {
        let body = r#"{"detail":[{"loc":["body","sku"],"msg":"field required","type":"missing"},
                                 {"loc":["body","name"],"msg":"too short","type":"x"}]}"#;
        let err = ApiError::rejected(422, body);
        assert_eq!(err.message, "field required; too short");
    }

    #[test]
    fn rejected_falls_back_to_raw_body_or_status() {
        assert_eq!(ApiError::rejected(502, "Bad Gateway").message, "Bad Gateway");
        assert_eq!(
            ApiError::rejected(500, "  ").message,
            "request failed with status 500"
        );
    }

    #[test]
    fn display_includes_trace() {
        let err = ApiError::transport("offline")
            .in_op("products.list")
            .in_op("dashboard.load");
        assert_eq!(
            err.to_string(),
            "[TRANSPORT] offline | trace: products.list -> dashboard.load"
        );
    }

    #[test]
    fn user_message_only_leaks_validation_text() {
        let fallback = "Failed to update inventory.";
        assert_eq!(
            ApiError::validation("Please enter a valid quantity.").user_message(fallback),
            "Please enter a valid quantity."
        );
        assert_eq!(
            ApiError::rejected(400, r#"{"detail":"nope"}"#).user_message(fallback),
            fallback
        );
    }
}
