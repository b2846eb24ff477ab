use super::*;
use crate::config::ClientConfig;
use crate::error::ApiErrorKind;
use crate::forms::{ProductDraft, submit_product};
use crate::request::{HttpMethod, MockHttpClient};
use crate::storage::MemoryStore;
use serde_json::json;

const BASE: &str = "http://127.0.0.1:8000";

const MANAGER: Capabilities = Capabilities {
    manage_catalog: true,
    view_analytics: true,
};
const OPERATOR: Capabilities = Capabilities {
    manage_catalog: false,
    view_analytics: false,
};

fn api() -> InventoryApi<MockHttpClient, MemoryStore> {
    InventoryApi::new(MockHttpClient::new(), MemoryStore::new(), ClientConfig::default())
}

fn products_url() -> String {
    format!("{BASE}/products/")
}

fn kpis_url() -> String {
    format!("{BASE}/analytics/kpis")
}

fn product(id: Uuid, name: &str, sku: &str) -> serde_json::Value {
    json!({
        "id": id, "name": name, "sku": sku, "description": "",
        "quantity_on_hand": 7, "reorder_point": 10
    })
}

#[tokio::test]
async fn manager_load_fetches_products_and_kpis() {
    let api = api();
    let id = Uuid::new_v4();
    api.client()
        .mock_response(HttpMethod::Get, &products_url(), 200, json!([product(id, "A", "A-1")]));
    api.client().mock_response(
        HttpMethod::Get,
        &kpis_url(),
        200,
        json!({"total_products": 1, "low_stock_items": 1}),
    );

    let snapshot = load_dashboard(&api, MANAGER).await.unwrap();
    assert_eq!(snapshot.products.len(), 1);
    assert!(snapshot.product(id).is_some());
    assert_eq!(snapshot.kpis.map(|k| k.low_stock_items), Some(1));
}

#[tokio::test]
async fn operator_load_skips_kpis() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Get, &products_url(), 200, json!([]));

    let snapshot = load_dashboard(&api, OPERATOR).await.unwrap();
    assert!(snapshot.products.is_empty());
    assert_eq!(snapshot.kpis, None);
    assert_eq!(api.client().calls_to(HttpMethod::Get, &kpis_url()), 0);
}

#[tokio::test]
async fn one_failed_request_fails_the_batch() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Get, &products_url(), 200, json!([]));
    api.client().mock_response(
        HttpMethod::Get,
        &kpis_url(),
        500,
        json!({"detail": "Internal Server Error"}),
    );

    let err = load_dashboard(&api, MANAGER).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Rejected { status: 500 });
    assert_eq!(err.spans(), ["analytics.kpis", "dashboard.load"]);
}

#[tokio::test]
async fn created_product_appears_once_after_refetch() {
    let api = api();
    let existing = Uuid::new_v4();
    let created = Uuid::new_v4();
    api.client().enqueue(
        HttpMethod::Get,
        &products_url(),
        200,
        json!([product(existing, "Old", "O-1")]),
    );
    api.client().enqueue(
        HttpMethod::Get,
        &products_url(),
        200,
        json!([product(existing, "Old", "O-1"), product(created, "New", "N-1")]),
    );
    api.client().mock_response(
        HttpMethod::Post,
        &products_url(),
        201,
        product(created, "New", "N-1"),
    );

    let before = load_dashboard(&api, OPERATOR).await.unwrap();
    assert!(before.product(created).is_none());

    let mut draft = ProductDraft::blank();
    draft.name = "New".into();
    draft.sku = "N-1".into();
    submit_product(&api, None, draft.validate().unwrap()).await.unwrap();

    let after = load_dashboard(&api, OPERATOR).await.unwrap();
    assert_eq!(after.products.iter().filter(|p| p.id == created).count(), 1);
}

#[test]
fn delete_prompt_names_product_and_sku() {
    let prompt = DeletePrompt::new(Product {
        id: Uuid::nil(),
        name: "Widget".into(),
        sku: "W-1".into(),
        description: None,
        quantity_on_hand: 0,
        reorder_point: 0,
    });
    assert_eq!(
        prompt.message(),
        "Delete product \"Widget\" (SKU: W-1)? This action cannot be undone."
    );
    assert_eq!(prompt.confirm_label(), "Delete");
}

#[tokio::test]
async fn confirmed_delete_notifies_and_refetches() {
    let api = api();
    let id = Uuid::new_v4();
    api.client()
        .mock_raw(HttpMethod::Delete, &format!("{BASE}/products/{id}"), 204, "");
    api.client()
        .mock_response(HttpMethod::Get, &products_url(), 200, json!([]));

    let outcome = confirm_delete(&api, OPERATOR, id).await;
    assert!(outcome.deleted);
    assert_eq!(outcome.notification, Notification::success(MSG_PRODUCT_DELETED));
    let refreshed = outcome.refreshed.unwrap().unwrap();
    assert!(refreshed.products.is_empty());
}

#[tokio::test]
async fn failed_delete_keeps_prompt_and_skips_refetch() {
    let api = api();
    let id = Uuid::new_v4();
    api.client().mock_response(
        HttpMethod::Delete,
        &format!("{BASE}/products/{id}"),
        400,
        json!({"detail": "Cannot delete product with existing inventory movements."}),
    );

    let outcome = confirm_delete(&api, MANAGER, id).await;
    assert!(!outcome.deleted);
    assert_eq!(outcome.notification.severity, Severity::Error);
    assert_eq!(outcome.notification.message, MSG_DELETE_FAILED);
    assert!(outcome.refreshed.is_none());
    assert_eq!(api.client().calls_to(HttpMethod::Get, &products_url()), 0);
}

#[tokio::test]
async fn anomaly_fetch_failure_shows_empty_state() {
    let api = api();
    let id = Uuid::new_v4();
    api.client()
        .mock_offline(HttpMethod::Get, &format!("{BASE}/analytics/anomalies/{id}"));
    assert!(load_anomalies(&api, Some(id)).await.is_empty());

    api.client().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/analytics/anomalies"),
        200,
        json!([{
            "id": Uuid::new_v4(), "product_id": id, "product_name": "A",
            "change_quantity": 900, "event_date": "2025-01-02 08:00", "reason": null
        }]),
    );
    let report = load_anomalies(&api, None).await;
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].reason, None);
}
