//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑，不依赖 DOM 或 web_sys。

use std::fmt::Display;
use uuid::Uuid;

const PRODUCTS_PREFIX: &str = "/products/";

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    #[default]
    Login,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 产品详情与图表 (需要认证)
    ProductDetail(Uuid),
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "" => Self::Dashboard,
            "/login" => Self::Login,
            _ => path
                .strip_prefix(PRODUCTS_PREFIX)
                .map(|rest| rest.trim_end_matches('/'))
                .and_then(|id| Uuid::parse_str(id).ok())
                .map(Self::ProductDetail)
                .unwrap_or(Self::NotFound),
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/".to_string(),
            Self::ProductDetail(id) => format!("{PRODUCTS_PREFIX}{id}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::ProductDetail(_))
    }

    /// 已认证用户是否应该离开此路由（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// Guard decision: where a visit to `self` actually lands
    pub fn resolve(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
