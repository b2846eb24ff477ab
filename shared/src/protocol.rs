use crate::{
    Anomaly, DashboardKpis, LoginToken, MovementRequest, Product, ProductPayload, SeriesPoint,
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// JSON body type; `()` for body-less requests.
    type Body: Serialize;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Operation name used in logs and error traces.
    const OP: &'static str;

    /// The URL path, including any path parameters.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Credentials exchange. Sent form-encoded, so it has no JSON body.
pub struct Login;

impl ApiRequest for Login {
    type Response = LoginToken;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    const OP: &'static str = "auth.login";

    fn path(&self) -> String {
        "/login/token".to_string()
    }
}

pub struct ListProducts;

impl ApiRequest for ListProducts {
    type Response = Vec<Product>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const OP: &'static str = "products.list";

    fn path(&self) -> String {
        "/products/".to_string()
    }
}

pub struct GetProduct(pub Uuid);

impl ApiRequest for GetProduct {
    type Response = Product;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const OP: &'static str = "products.get";

    fn path(&self) -> String {
        format!("/products/{}", self.0)
    }
}

pub struct CreateProduct(pub ProductPayload);

impl ApiRequest for CreateProduct {
    type Response = Product;
    type Body = ProductPayload;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OP: &'static str = "products.create";

    fn path(&self) -> String {
        "/products/".to_string()
    }

    fn body(&self) -> Option<&ProductPayload> {
        Some(&self.0)
    }
}

pub struct UpdateProduct {
    pub id: Uuid,
    pub payload: ProductPayload,
}

impl ApiRequest for UpdateProduct {
    type Response = Product;
    type Body = ProductPayload;
    const METHOD: HttpMethod = HttpMethod::Put;
    const OP: &'static str = "products.update";

    fn path(&self) -> String {
        format!("/products/{}", self.id)
    }

    fn body(&self) -> Option<&ProductPayload> {
        Some(&self.payload)
    }
}

/// 204 on success. We treat success as ().
pub struct DeleteProduct(pub Uuid);

impl ApiRequest for DeleteProduct {
    type Response = ();
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const OP: &'static str = "products.delete";

    fn path(&self) -> String {
        format!("/products/{}", self.0)
    }
}

pub struct MoveInventory(pub MovementRequest);

impl ApiRequest for MoveInventory {
    type Response = Product;
    type Body = MovementRequest;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OP: &'static str = "inventory.move";

    fn path(&self) -> String {
        "/inventory/move".to_string()
    }

    fn body(&self) -> Option<&MovementRequest> {
        Some(&self.0)
    }
}

pub struct GetKpis;

impl ApiRequest for GetKpis {
    type Response = DashboardKpis;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const OP: &'static str = "analytics.kpis";

    fn path(&self) -> String {
        "/analytics/kpis".to_string()
    }
}

/// Which per-product series to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Historical,
    Forecast,
    Scheduled,
}

impl SeriesKind {
    pub fn segment(&self) -> &'static str {
        match self {
            SeriesKind::Historical => "historical",
            SeriesKind::Forecast => "forecast",
            SeriesKind::Scheduled => "scheduled",
        }
    }
}

pub struct GetSeries {
    pub kind: SeriesKind,
    pub product_id: Uuid,
}

impl ApiRequest for GetSeries {
    type Response = Vec<SeriesPoint>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const OP: &'static str = "analytics.series";

    fn path(&self) -> String {
        format!("/analytics/{}/{}", self.kind.segment(), self.product_id)
    }
}

/// Global anomaly report, or one product's anomalies when an id is given
pub struct ListAnomalies(pub Option<Uuid>);

impl ApiRequest for ListAnomalies {
    type Response = Vec<Anomaly>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const OP: &'static str = "analytics.anomalies";

    fn path(&self) -> String {
        match self.0 {
            Some(id) => format!("/analytics/anomalies/{id}"),
            None => "/analytics/anomalies".to_string(),
        }
    }
}
