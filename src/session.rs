//! Persisted login state.
//!
//! The token and role live under two storage keys and are always written and
//! cleared together. Role checks only produce [`Capabilities`], which decide
//! what the UI shows; the backend stays the authorization boundary.

use crate::api::InventoryApi;
use crate::error::ApiResult;
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use log::info;
use stockroom_shared::Role;

pub const TOKEN_KEY: &str = "authToken";
pub const ROLE_KEY: &str = "userRole";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(self.role.as_ref())
    }
}

/// UI affordances granted by a role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Add, edit and delete products
    pub manage_catalog: bool,
    /// KPI cards, charts, anomaly reports
    pub view_analytics: bool,
}

impl Capabilities {
    pub fn for_role(role: Option<&Role>) -> Self {
        let manager = role.is_some_and(Role::is_manager);
        Self {
            manage_catalog: manager,
            view_analytics: manager,
        }
    }
}

pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read whatever survived the last page load
    pub fn load(&self) -> Session {
        Session {
            token: self.store.get(TOKEN_KEY).filter(|t| !t.is_empty()),
            role: self.store.get(ROLE_KEY).map(Role::from),
        }
    }

    pub fn persist(&self, token: &str, role: &Role) -> Session {
        self.store.set(TOKEN_KEY, token);
        self.store.set(ROLE_KEY, role.as_str());
        Session {
            token: Some(token.to_string()),
            role: Some(role.clone()),
        }
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(ROLE_KEY);
        info!("session cleared");
    }
}

/// Submit credentials and adopt the returned session.
///
/// Nothing is persisted when the backend rejects the credentials.
pub async fn login<C, A, S>(
    api: &InventoryApi<C, A>,
    sessions: &SessionStore<S>,
    identifier: &str,
    secret: &str,
) -> ApiResult<Session>
where
    C: HttpClient,
    A: KeyValueStore,
    S: KeyValueStore,
{
    let token = api
        .login(identifier, secret)
        .await
        .map_err(|e| e.in_op("session.login"))?;
    info!("logged in as {}", token.user_role.as_str());
    Ok(sessions.persist(&token.access_token, &token.user_role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiErrorKind;
    use crate::request::{CONTENT_TYPE_FORM, HttpMethod, MockHttpClient, RequestBody};
    use crate::storage::MemoryStore;
    use serde_json::json;

    const LOGIN_URL: &str = "http://127.0.0.1:8000/login/token";

    fn setup() -> (InventoryApi<MockHttpClient, MemoryStore>, SessionStore<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let api = InventoryApi::new(MockHttpClient::new(), store.clone(), ClientConfig::default());
        (api, SessionStore::new(store.clone()), store)
    }

    #[test]
    fn capabilities_follow_role() {
        let manager = Capabilities::for_role(Some(&Role::Manager));
        assert!(manager.manage_catalog && manager.view_analytics);
        assert_eq!(Capabilities::for_role(Some(&Role::Operator)), Capabilities::default());
        assert_eq!(Capabilities::for_role(None), Capabilities::default());
    }

    #[tokio::test]
    async fn login_persists_token_and_role() {
        let (api, sessions, store) = setup();
        api.client().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            json!({"access_token": "tok-1", "token_type": "bearer", "user_role": "manager"}),
        );

        let session = login(&api, &sessions, "boss@example.com", "hunter2").await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.role, Some(Role::Manager));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(store.get(ROLE_KEY).as_deref(), Some("manager"));
        assert_eq!(sessions.load(), session);

        let sent = api.client().last_request().unwrap();
        let body = sent.body.unwrap();
        assert_eq!(body.content_type(), CONTENT_TYPE_FORM);
        assert_eq!(
            body,
            RequestBody::Form("username=boss%40example.com&password=hunter2".to_string())
        );
    }

    #[tokio::test]
    async fn rejected_login_persists_nothing() {
        let (api, sessions, store) = setup();
        api.client().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            401,
            json!({"detail": "Incorrect email or password"}),
        );

        let err = login(&api, &sessions, "x", "y").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Rejected { status: 401 });
        assert_eq!(err.message, "Incorrect email or password");
        assert!(store.is_empty());
        assert!(!sessions.load().is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_both_keys() {
        let (api, sessions, store) = setup();
        api.client().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            json!({"access_token": "tok", "user_role": "operator"}),
        );
        login(&api, &sessions, "op", "pw").await.unwrap();
        assert_eq!(store.len(), 2);

        sessions.clear();
        assert!(store.is_empty());
        assert_eq!(sessions.load(), Session::default());
    }

    #[test]
    fn blank_token_is_not_a_session() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "");
        store.set(ROLE_KEY, "manager");
        let session = SessionStore::new(store).load();
        assert!(!session.is_authenticated());
        assert!(session.capabilities().manage_catalog);
    }
}
