use crate::web::http::BrowserHttpClient;
use crate::web::storage::BrowserStorage;
use stockroom::{ClientConfig, InventoryApi};

/// Browser-backed API client. Both halves are zero-sized, so building one per
/// request is free and avoids sharing across `spawn_local` tasks.
pub type Api = InventoryApi<BrowserHttpClient, BrowserStorage>;

/// Build-time overrides: `STOCKROOM_API_URL`, `STOCKROOM_NOTIFICATION_MS`
pub fn client_config() -> ClientConfig {
    ClientConfig::from_overrides(
        option_env!("STOCKROOM_API_URL"),
        option_env!("STOCKROOM_NOTIFICATION_MS"),
    )
}

pub fn api() -> Api {
    InventoryApi::new(BrowserHttpClient, BrowserStorage, client_config())
}
