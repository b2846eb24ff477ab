//! 认证模块
//!
//! 会话保存在 LocalStorage（`authToken` / `userRole`），启动时恢复。
//! 路由服务只拿到派生的 `is_authenticated` 信号，与本模块解耦。

use crate::api::api;
use crate::web::storage::BrowserStorage;
use leptos::prelude::*;
use log::info;
use stockroom::session::{self, Capabilities, Session, SessionStore};
use stockroom::ApiResult;

fn sessions() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}

/// 认证上下文，整个应用唯一的全局状态
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复会话
    pub fn restore() -> Self {
        let session = sessions().load();
        if session.is_authenticated() {
            info!("restored session");
        }
        Self {
            session: RwSignal::new(session),
        }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Session::is_authenticated))
    }

    pub fn capabilities(&self) -> Signal<Capabilities> {
        let session = self.session;
        Signal::derive(move || session.with(Session::capabilities))
    }

    /// 登录成功后写入 LocalStorage 并更新信号，路由随之跳转
    pub async fn login(self, identifier: String, secret: String) -> ApiResult<()> {
        let adopted = session::login(&api(), &sessions(), &identifier, &secret).await?;
        self.session.set(adopted);
        Ok(())
    }

    /// 清除会话；不需要手动导航，路由服务监听认证状态
    pub fn logout(&self) {
        sessions().clear();
        self.session.set(Session::default());
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
