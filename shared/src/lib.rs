use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_OPERATOR: &str = "operator";

// =========================================================
// 身份 (Identity)
// =========================================================

/// Role string returned by the login endpoint.
///
/// Unknown roles are kept verbatim and treated as unprivileged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Manager,
    Operator,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Manager => ROLE_MANAGER,
            Role::Operator => ROLE_OPERATOR,
            Role::Other(s) => s,
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            ROLE_MANAGER => Role::Manager,
            ROLE_OPERATOR => Role::Operator,
            _ => Role::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// `POST /login/token` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user_role: Role,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Form-encoded credentials (OAuth2 password flow field names)
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity_on_hand: i64,
    pub reorder_point: i64,
}

/// Body of `POST /products/` and `PUT /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub sku: String,
    pub description: String,
    pub reorder_point: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementReason {
    #[default]
    #[serde(rename = "Shipment Received")]
    ShipmentReceived,
    #[serde(rename = "Sale")]
    Sale,
    #[serde(rename = "Correction")]
    Correction,
}

impl MovementReason {
    pub const ALL: [MovementReason; 3] = [
        MovementReason::ShipmentReceived,
        MovementReason::Sale,
        MovementReason::Correction,
    ];

    /// Wire value, also used as the `<option>` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementReason::ShipmentReceived => "Shipment Received",
            MovementReason::Sale => "Sale",
            MovementReason::Correction => "Correction",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MovementReason::ShipmentReceived => "Shipment Received (+)",
            MovementReason::Sale => "Sale (-)",
            MovementReason::Correction => "Correction (+/-)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

/// Body of `POST /inventory/move`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRequest {
    pub product_id: Uuid,
    pub change_quantity: i64,
    pub reason: MovementReason,
}

// =========================================================
// 分析投影 (Analytics Projections)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardKpis {
    pub total_products: u64,
    pub low_stock_items: u64,
}

/// One point of the historical, forecast or scheduled series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: Timestamp,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub change_quantity: i64,
    pub event_date: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_unknown_values() {
        let role: Role = serde_json::from_str("\"auditor\"").unwrap();
        assert_eq!(role, Role::Other("auditor".to_string()));
        assert!(!role.is_manager());
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"auditor\"");

        let manager: Role = serde_json::from_str("\"manager\"").unwrap();
        assert!(manager.is_manager());
    }

    #[test]
    fn movement_reason_uses_display_strings_on_the_wire() {
        let req = MovementRequest {
            product_id: Uuid::nil(),
            change_quantity: -15,
            reason: MovementReason::Sale,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["reason"], "Sale");
        assert_eq!(json["change_quantity"], -15);

        let received: MovementReason = serde_json::from_str("\"Shipment Received\"").unwrap();
        assert_eq!(received, MovementReason::ShipmentReceived);
        assert_eq!(MovementReason::parse("Correction"), Some(MovementReason::Correction));
        assert_eq!(MovementReason::parse("Theft"), None);
    }

    #[test]
    fn login_token_defaults_token_type() {
        let token: LoginToken =
            serde_json::from_str(r#"{"access_token":"abc","user_role":"operator"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.user_role, Role::Operator);
    }

    #[test]
    fn product_accepts_missing_description() {
        let json = r#"{
            "id": "6f1c6c1e-8d7e-4a53-9a7c-2b8f0f3a8f11",
            "name": "Widget",
            "sku": "W-1",
            "quantity_on_hand": 3,
            "reorder_point": 10
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.description, None);
    }

    #[test]
    fn product_carries_only_backend_fields() {
        let json = r#"{
            "id": "6f1c6c1e-8d7e-4a53-9a7c-2b8f0f3a8f11",
            "name": "Widget",
            "sku": "W-1",
            "quantity_on_hand": 9,
            "reorder_point": 10
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!((product.quantity_on_hand, product.reorder_point), (9, 10));

        // no client-side stock classification is added on the way back out
        let value = serde_json::to_value(&product).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["description", "id", "name", "quantity_on_hand", "reorder_point", "sku"]
        );
    }
}
