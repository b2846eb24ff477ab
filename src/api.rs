use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest};
use crate::session::TOKEN_KEY;
use crate::storage::KeyValueStore;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use stockroom_shared::protocol::{
    ApiRequest, CreateProduct, DeleteProduct, GetKpis, GetProduct, GetSeries, ListAnomalies,
    ListProducts, Login, MoveInventory, SeriesKind, UpdateProduct,
};
use stockroom_shared::{
    Anomaly, DashboardKpis, HEADER_AUTHORIZATION, LoginForm, LoginToken, MovementRequest, Product,
    ProductPayload, SeriesPoint,
};
use uuid::Uuid;

// =========================================================
// 网关: InventoryApi
// =========================================================

/// The one outbound gateway to the inventory backend.
///
/// The bearer token is read from `store` on every request, so a login or
/// logout takes effect on the next call without rebuilding the client.
pub struct InventoryApi<C: HttpClient, S: KeyValueStore> {
    client: C,
    store: S,
    config: ClientConfig,
}

impl<C: HttpClient, S: KeyValueStore> InventoryApi<C, S> {
    pub fn new(client: C, store: S, config: ClientConfig) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn bearer(&self) -> Option<String> {
        self.store
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {t}"))
    }

    /// Send a described request with its JSON body, if any.
    pub async fn call<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let url = self.config.url(&request.path());
        let mut http = HttpRequest::new(&url, R::METHOD);
        if let Some(body) = request.body() {
            http = http.with_json(body).map_err(|e| e.in_op(R::OP))?;
        }
        self.execute(http, R::OP).await
    }

    async fn execute<T: DeserializeOwned>(&self, mut http: HttpRequest, op: &str) -> ApiResult<T> {
        if let Some(bearer) = self.bearer() {
            http = http.with_header(HEADER_AUTHORIZATION, &bearer);
        }
        debug!("{} {} ({op})", http.method.as_str(), http.url);

        let resp = self.client.send(http).await.map_err(|e| e.in_op(op))?;
        if !resp.is_success() {
            let err = ApiError::rejected(resp.status, &resp.body).in_op(op);
            warn!("{err}");
            return Err(err);
        }
        resp.json().map_err(|e: ApiError| {
            let err = e.in_op(op);
            warn!("{err}");
            err
        })
    }

    // ---------------------------------------------------------
    // 认证
    // ---------------------------------------------------------

    /// Exchange credentials for a token. The body is form-encoded.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginToken> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let url = self.config.url(&Login.path());
        let http = HttpRequest::new(&url, Login::METHOD)
            .with_form(&form)
            .map_err(|e| e.in_op(Login::OP))?;
        self.execute(http, Login::OP).await
    }

    // ---------------------------------------------------------
    // 产品
    // ---------------------------------------------------------

    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.call(&ListProducts).await
    }

    pub async fn get_product(&self, id: Uuid) -> ApiResult<Product> {
        self.call(&GetProduct(id)).await
    }

    pub async fn create_product(&self, payload: ProductPayload) -> ApiResult<Product> {
        self.call(&CreateProduct(payload)).await
    }

    pub async fn update_product(&self, id: Uuid, payload: ProductPayload) -> ApiResult<Product> {
        self.call(&UpdateProduct { id, payload }).await
    }

    pub async fn delete_product(&self, id: Uuid) -> ApiResult<()> {
        self.call(&DeleteProduct(id)).await
    }

    pub async fn move_inventory(&self, movement: MovementRequest) -> ApiResult<Product> {
        self.call(&MoveInventory(movement)).await
    }

    // ---------------------------------------------------------
    // 分析
    // ---------------------------------------------------------

    pub async fn kpis(&self) -> ApiResult<DashboardKpis> {
        self.call(&GetKpis).await
    }

    pub async fn history(&self, product_id: Uuid) -> ApiResult<Vec<SeriesPoint>> {
        self.series(SeriesKind::Historical, product_id).await
    }

    pub async fn forecast(&self, product_id: Uuid) -> ApiResult<Vec<SeriesPoint>> {
        self.series(SeriesKind::Forecast, product_id).await
    }

    pub async fn scheduled(&self, product_id: Uuid) -> ApiResult<Vec<SeriesPoint>> {
        self.series(SeriesKind::Scheduled, product_id).await
    }

    async fn series(&self, kind: SeriesKind, product_id: Uuid) -> ApiResult<Vec<SeriesPoint>> {
        self.call(&GetSeries { kind, product_id })
            .await
            .map_err(|e| e.in_op(kind.segment()))
    }

    pub async fn anomalies(&self) -> ApiResult<Vec<Anomaly>> {
        self.call(&ListAnomalies(None)).await
    }

    pub async fn product_anomalies(&self, product_id: Uuid) -> ApiResult<Vec<Anomaly>> {
        self.call(&ListAnomalies(Some(product_id))).await
    }
}

#[cfg(test)]
mod tests;
