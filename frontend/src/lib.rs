//! Stockroom 前端应用
//!
//! Context-Driven 架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态，唯一的全局 Context
//! - `components`: UI 组件层；数据编排在 `stockroom` core crate 中

mod api;
mod auth;
mod components {
    pub mod anomaly;
    pub mod dashboard;
    mod delete_dialog;
    mod icons;
    mod inventory_dialog;
    pub mod login;
    mod notification;
    pub mod product_detail;
    mod product_dialog;
    mod stat_card;
    mod stock_chart;
}

use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::product_detail::ProductDetailPage;

use leptos::prelude::*;

// 浏览器 API 适配层：把 gloo-* 接到 core crate 的 trait 上
pub(crate) mod web {
    pub mod dialog;
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
    pub mod timer;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

const DEBUG_FLAG_KEY: &str = "debug_enabled";

/// `Debug` when `localStorage.debug_enabled == "true"`, else `Info`
pub fn log_level() -> log::Level {
    let debug = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(DEBUG_FLAG_KEY).ok().flatten())
        .is_some_and(|v| v == "true");
    if debug {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::ProductDetail(id) => view! { <ProductDetailPage id=id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Dashboard class="btn btn-link mt-4">"Back to Dashboard"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 会话从 LocalStorage 恢复
    let auth_ctx = AuthContext::restore();
    provide_context(auth_ctx);

    // 2. 认证信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
