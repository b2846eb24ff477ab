use crate::api::InventoryApi;
use crate::error::ApiResult;
use crate::request::HttpClient;
use crate::session::Capabilities;
use crate::storage::KeyValueStore;
use log::{error, info, warn};
use stockroom_shared::{Anomaly, DashboardKpis, Product};
use uuid::Uuid;

pub const MSG_DASHBOARD_FAILED: &str = "Failed to fetch dashboard data.";
pub const MSG_PRODUCT_DELETED: &str = "Product deleted";
pub const MSG_DELETE_FAILED: &str = "Failed to delete product";
pub const MSG_NO_UNUSUAL_MOVEMENTS: &str = "No unusual movements detected.";
pub const MSG_NO_PRODUCT_ANOMALIES: &str = "No anomalies detected for this product.";

// =========================================================
// 数据快照
// =========================================================

/// Everything the dashboard renders. Replaced wholesale on every refetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub products: Vec<Product>,
    /// Only fetched for roles that can view analytics
    pub kpis: Option<DashboardKpis>,
}

impl DashboardSnapshot {
    pub fn product(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// Fetch the product list, plus KPIs when the role may see them, in parallel.
/// Either request failing fails the whole load.
pub async fn load_dashboard<C: HttpClient, S: KeyValueStore>(
    api: &InventoryApi<C, S>,
    capabilities: Capabilities,
) -> ApiResult<DashboardSnapshot> {
    let result = if capabilities.view_analytics {
        futures::try_join!(api.list_products(), api.kpis()).map(|(products, kpis)| {
            DashboardSnapshot {
                products,
                kpis: Some(kpis),
            }
        })
    } else {
        api.list_products()
            .await
            .map(|products| DashboardSnapshot {
                products,
                kpis: None,
            })
    };

    match result {
        Ok(snapshot) => {
            info!("dashboard loaded: {} products", snapshot.products.len());
            Ok(snapshot)
        }
        Err(e) => {
            let e = e.in_op("dashboard.load");
            error!("{e}");
            Err(e)
        }
    }
}

// =========================================================
// 通知 (Toast)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_class(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

// =========================================================
// 删除确认
// =========================================================

/// Pending delete confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct DeletePrompt {
    pub product: Product,
    pub deleting: bool,
}

impl DeletePrompt {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            deleting: false,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Delete product \"{}\" (SKU: {})? This action cannot be undone.",
            self.product.name, self.product.sku
        )
    }

    pub fn confirm_label(&self) -> &'static str {
        if self.deleting { "Deleting..." } else { "Delete" }
    }
}

#[derive(Debug)]
pub struct DeleteOutcome {
    /// The prompt closes only on success
    pub deleted: bool,
    pub notification: Notification,
    /// Fresh snapshot after a successful delete
    pub refreshed: Option<ApiResult<DashboardSnapshot>>,
}

/// Delete a confirmed product, then refetch the dashboard.
pub async fn confirm_delete<C: HttpClient, S: KeyValueStore>(
    api: &InventoryApi<C, S>,
    capabilities: Capabilities,
    product_id: Uuid,
) -> DeleteOutcome {
    match api.delete_product(product_id).await {
        Ok(()) => {
            info!("deleted product {product_id}");
            DeleteOutcome {
                deleted: true,
                notification: Notification::success(MSG_PRODUCT_DELETED),
                refreshed: Some(load_dashboard(api, capabilities).await),
            }
        }
        Err(e) => {
            warn!("{}", e.in_op("dashboard.delete"));
            DeleteOutcome {
                deleted: false,
                notification: Notification::error(MSG_DELETE_FAILED),
                refreshed: None,
            }
        }
    }
}

// =========================================================
// 异常报告
// =========================================================

/// Anomalies for one product, or the global report. A failed fetch is logged
/// and shown as the empty state.
pub async fn load_anomalies<C: HttpClient, S: KeyValueStore>(
    api: &InventoryApi<C, S>,
    product_id: Option<Uuid>,
) -> Vec<Anomaly> {
    let result = match product_id {
        Some(id) => api.product_anomalies(id).await,
        None => api.anomalies().await,
    };
    result.unwrap_or_else(|e| {
        error!("Failed to fetch anomalies: {e}");
        Vec::new()
    })
}

#[cfg(test)]
mod tests;
