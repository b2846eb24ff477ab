use super::*;
use crate::error::ApiErrorKind;
use crate::request::{CONTENT_TYPE_JSON, HttpMethod, MockHttpClient};
use crate::storage::MemoryStore;
use serde_json::json;
use stockroom_shared::MovementReason;

const BASE: &str = "http://127.0.0.1:8000";

fn api() -> InventoryApi<MockHttpClient, MemoryStore> {
    InventoryApi::new(MockHttpClient::new(), MemoryStore::new(), ClientConfig::default())
}

fn product_json(id: Uuid, name: &str, sku: &str, qty: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "sku": sku,
        "description": null,
        "quantity_on_hand": qty,
        "reorder_point": 10
    })
}

#[tokio::test]
async fn bearer_header_follows_persisted_token() {
    let api = api();
    let url = format!("{BASE}/products/");
    api.client().mock_response(HttpMethod::Get, &url, 200, json!([]));

    api.list_products().await.unwrap();
    let anon = api.client().last_request().unwrap();
    assert!(!anon.headers.contains_key(HEADER_AUTHORIZATION));

    api.store().set(TOKEN_KEY, "abc");
    api.list_products().await.unwrap();
    let authed = api.client().last_request().unwrap();
    assert_eq!(
        authed.headers.get(HEADER_AUTHORIZATION).map(String::as_str),
        Some("Bearer abc")
    );

    api.store().remove(TOKEN_KEY);
    api.list_products().await.unwrap();
    let after_logout = api.client().last_request().unwrap();
    assert!(!after_logout.headers.contains_key(HEADER_AUTHORIZATION));
}

#[tokio::test]
async fn empty_product_list_is_not_an_error() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Get, &format!("{BASE}/products/"), 200, json!([]));
    let products = api.list_products().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn create_and_update_send_json_payloads() {
    let api = api();
    let id = Uuid::new_v4();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/products/"),
        201,
        product_json(id, "Bolt", "B-1", 0),
    );
    api.client().mock_response(
        HttpMethod::Put,
        &format!("{BASE}/products/{id}"),
        200,
        product_json(id, "Bolt M8", "B-1", 0),
    );

    let payload = ProductPayload {
        name: "Bolt".into(),
        sku: "B-1".into(),
        description: String::new(),
        reorder_point: 10,
    };
    let created = api.create_product(payload.clone()).await.unwrap();
    assert_eq!(created.id, id);

    let sent = api.client().last_request().unwrap();
    let body = sent.body.unwrap();
    assert_eq!(body.content_type(), CONTENT_TYPE_JSON);
    let decoded: ProductPayload = serde_json::from_str(body.as_str()).unwrap();
    assert_eq!(decoded, payload);

    let updated = api
        .update_product(id, ProductPayload { name: "Bolt M8".into(), ..payload })
        .await
        .unwrap();
    assert_eq!(updated.name, "Bolt M8");
}

#[tokio::test]
async fn delete_accepts_empty_no_content() {
    let api = api();
    let id = Uuid::new_v4();
    api.client()
        .mock_raw(HttpMethod::Delete, &format!("{BASE}/products/{id}"), 204, "");
    api.delete_product(id).await.unwrap();
    assert_eq!(api.client().request_count(), 1);
}

#[tokio::test]
async fn delete_integrity_error_carries_detail() {
    let api = api();
    let id = Uuid::new_v4();
    api.client().mock_response(
        HttpMethod::Delete,
        &format!("{BASE}/products/{id}"),
        400,
        json!({"detail": "Cannot delete product with existing inventory movements."}),
    );
    let err = api.delete_product(id).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message, "Cannot delete product with existing inventory movements.");
    assert_eq!(err.spans(), ["products.delete"]);
}

#[tokio::test]
async fn move_inventory_serialises_reason_string() {
    let api = api();
    let id = Uuid::new_v4();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/inventory/move"),
        200,
        product_json(id, "Bolt", "B-1", 5),
    );
    let product = api
        .move_inventory(MovementRequest {
            product_id: id,
            change_quantity: -15,
            reason: MovementReason::Sale,
        })
        .await
        .unwrap();
    assert_eq!(product.quantity_on_hand, 5);

    let sent = api.client().last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.unwrap().as_str()).unwrap();
    assert_eq!(body["reason"], "Sale");
    assert_eq!(body["change_quantity"], -15);
}

#[tokio::test]
async fn analytics_endpoints_decode() {
    let api = api();
    let id = Uuid::new_v4();
    api.client().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/analytics/kpis"),
        200,
        json!({"total_products": 12, "low_stock_items": 3}),
    );
    api.client().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/analytics/forecast/{id}"),
        200,
        json!([{"timestamp": "2025-03-01T00:00:00", "quantity": 4}]),
    );
    api.client().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/analytics/anomalies/{id}"),
        200,
        json!([{
            "id": Uuid::new_v4(),
            "product_id": id,
            "product_name": "Bolt",
            "change_quantity": -400,
            "event_date": "2025-03-01 10:15",
            "reason": "Sale"
        }]),
    );

    let kpis = api.kpis().await.unwrap();
    assert_eq!(kpis, DashboardKpis { total_products: 12, low_stock_items: 3 });

    let forecast = api.forecast(id).await.unwrap();
    assert_eq!(forecast.len(), 1);
    assert_eq!(forecast[0].quantity, 4);

    let anomalies = api.product_anomalies(id).await.unwrap();
    assert_eq!(anomalies[0].change_quantity, -400);
    assert_eq!(anomalies[0].reason.as_deref(), Some("Sale"));
}

#[tokio::test]
async fn error_kinds_are_distinguished() {
    let api = api();
    let id = Uuid::new_v4();
    let detail_url = format!("{BASE}/products/{id}");

    api.client()
        .mock_response(HttpMethod::Get, &detail_url, 200, json!({"unexpected": true}));
    let decode = api.get_product(id).await.unwrap_err();
    assert_eq!(decode.kind, ApiErrorKind::Decode);

    api.client().mock_offline(HttpMethod::Get, &detail_url);
    let transport = api.get_product(id).await.unwrap_err();
    assert_eq!(transport.kind, ApiErrorKind::Transport);
    assert_eq!(transport.spans(), ["products.get"]);

    let missing = api.history(id).await.unwrap_err();
    assert_eq!(missing.kind, ApiErrorKind::Rejected { status: 404 });
    assert_eq!(missing.spans(), ["analytics.series", "historical"]);
}

#[tokio::test]
async fn custom_base_url_is_used() {
    let api = InventoryApi::new(
        MockHttpClient::new(),
        MemoryStore::new(),
        ClientConfig::default().with_base_url("https://stock.example.com/"),
    );
    api.client().mock_response(
        HttpMethod::Get,
        "https://stock.example.com/analytics/anomalies",
        200,
        json!([]),
    );
    assert!(api.anomalies().await.unwrap().is_empty());
}
