use std::time::Duration;

// =========================================================
// 客户端配置 (Client Configuration)
// =========================================================

/// 默认值，构建时没有覆盖就用这些
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_NOTIFICATION_MS: u64 = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash
    pub api_base_url: String,
    /// How long a toast stays visible
    pub notification_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            notification_ttl: Duration::from_millis(DEFAULT_NOTIFICATION_MS),
        }
    }
}

impl ClientConfig {
    /// Apply optional overrides. Blank or unparsable values fall back to the
    /// defaults.
    pub fn from_overrides(api_base_url: Option<&str>, notification_ms: Option<&str>) -> Self {
        let defaults = Self::default();
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(normalize_base_url)
            .unwrap_or(defaults.api_base_url);
        let notification_ttl = notification_ms
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.notification_ttl);

        Self {
            api_base_url,
            notification_ttl,
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_base_url(url);
        self
    }

    /// Join a `/`-prefixed path onto the base URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.url("/products/"), "http://127.0.0.1:8000/products/");
        assert_eq!(cfg.notification_ttl, Duration::from_secs(4));
    }

    #[test]
    fn overrides_are_normalised() {
        let cfg = ClientConfig::from_overrides(Some(" https://api.example.com/ "), Some("2500"));
        assert_eq!(cfg.api_base_url, "https://api.example.com");
        assert_eq!(cfg.url("analytics/kpis"), "https://api.example.com/analytics/kpis");
        assert_eq!(cfg.notification_ttl, Duration::from_millis(2500));
    }

    #[test]
    fn bad_overrides_fall_back() {
        let cfg = ClientConfig::from_overrides(Some("   "), Some("soon"));
        assert_eq!(cfg, ClientConfig::default());
        let zero = ClientConfig::from_overrides(None, Some("0"));
        assert_eq!(zero.notification_ttl, Duration::from_millis(DEFAULT_NOTIFICATION_MS));
    }
}
