use crate::api::InventoryApi;
use crate::chart::ChartSeries;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use log::{error, info};
use stockroom_shared::protocol::SeriesKind;
use stockroom_shared::{Product, SeriesPoint};
use uuid::Uuid;

pub const MSG_DETAIL_FAILED: &str = "Failed to fetch product data. Please try again.";
pub const MSG_PRODUCT_NOT_FOUND: &str = "Product not found.";
pub const MSG_NO_CHART_DATA: &str =
    "No historical data available to display a chart. Please add some sales movements.";

/// Product plus its three analytics series
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub history: Vec<SeriesPoint>,
    pub forecast: Vec<SeriesPoint>,
    pub scheduled: Vec<SeriesPoint>,
}

impl ProductDetail {
    /// Non-empty series in legend order
    pub fn chart_series(&self) -> Vec<ChartSeries> {
        [
            (SeriesKind::Historical, &self.history),
            (SeriesKind::Forecast, &self.forecast),
            (SeriesKind::Scheduled, &self.scheduled),
        ]
        .into_iter()
        .filter_map(|(kind, points)| ChartSeries::new(kind, points.clone()))
        .collect()
    }

    pub fn has_chart_data(&self) -> bool {
        !(self.history.is_empty() && self.forecast.is_empty() && self.scheduled.is_empty())
    }
}

/// Page-level message for a failed load. A 404 means the id is stale.
pub fn failure_message(error: &ApiError) -> &'static str {
    match error.status() {
        Some(404) => MSG_PRODUCT_NOT_FOUND,
        _ => MSG_DETAIL_FAILED,
    }
}

/// Fetch the product and its series in parallel; any failure fails the page.
pub async fn load_product_detail<C: HttpClient, S: KeyValueStore>(
    api: &InventoryApi<C, S>,
    id: Uuid,
) -> ApiResult<ProductDetail> {
    let result = futures::try_join!(
        api.get_product(id),
        api.history(id),
        api.forecast(id),
        api.scheduled(id)
    );
    match result {
        Ok((product, history, forecast, scheduled)) => {
            info!(
                "loaded {} ({} history, {} forecast, {} scheduled points)",
                product.sku,
                history.len(),
                forecast.len(),
                scheduled.len()
            );
            Ok(ProductDetail {
                product,
                history,
                forecast,
                scheduled,
            })
        }
        Err(e) => {
            let e = e.in_op("detail.load");
            error!("{e}");
            Err(e)
        }
    }
}
