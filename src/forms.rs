//! Form drafts for the product and inventory dialogs.
//!
//! A draft holds exactly what the user typed. Validation turns it into the
//! request body, or into an `ApiErrorKind::Validation` error that never
//! reaches the network.

use crate::api::InventoryApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use stockroom_shared::{MovementReason, MovementRequest, Product, ProductPayload};
use uuid::Uuid;

pub const MSG_NAME_SKU_REQUIRED: &str = "Name and SKU are required.";
pub const MSG_CREATE_FAILED: &str = "Failed to create product. The SKU might already exist.";
pub const MSG_UPDATE_FAILED: &str = "Failed to update product. The SKU might already exist.";
pub const MSG_INVALID_QUANTITY: &str = "Please enter a valid quantity.";
pub const MSG_MOVE_FAILED: &str = "Failed to update inventory.";

const DEFAULT_REORDER_POINT: &str = "10";

/// Leading-integer parse: optional whitespace, optional sign, then digits.
/// Anything after the digits is ignored; no digits means `None`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// =========================================================
// 产品表单 (Add / Edit Product)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    /// `Some` when editing an existing product
    pub target: Option<Uuid>,
    pub name: String,
    pub sku: String,
    pub description: String,
    pub reorder_point: String,
}

impl ProductDraft {
    pub fn blank() -> Self {
        Self {
            target: None,
            name: String::new(),
            sku: String::new(),
            description: String::new(),
            reorder_point: DEFAULT_REORDER_POINT.to_string(),
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            target: Some(product.id),
            name: product.name.clone(),
            sku: product.sku.clone(),
            description: product.description.clone().unwrap_or_default(),
            reorder_point: product.reorder_point.to_string(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() { "Edit Product" } else { "Add New Product" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() { "Save Changes" } else { "Add Product" }
    }

    pub fn failure_message(&self) -> &'static str {
        if self.is_edit() {
            MSG_UPDATE_FAILED
        } else {
            MSG_CREATE_FAILED
        }
    }

    pub fn validate(&self) -> ApiResult<ProductPayload> {
        if self.name.is_empty() || self.sku.is_empty() {
            return Err(ApiError::validation(MSG_NAME_SKU_REQUIRED));
        }
        Ok(ProductPayload {
            name: self.name.clone(),
            sku: self.sku.clone(),
            description: self.description.clone(),
            reorder_point: parse_leading_int(&self.reorder_point).unwrap_or(0),
        })
    }
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self::blank()
    }
}

/// Send a validated product payload: create for a blank draft, update for an
/// edit draft.
pub async fn submit_product<C: HttpClient, S: KeyValueStore>(
    api: &InventoryApi<C, S>,
    target: Option<Uuid>,
    payload: ProductPayload,
) -> ApiResult<Product> {
    match target {
        Some(id) => api.update_product(id, payload).await,
        None => api.create_product(payload).await,
    }
}

// =========================================================
// 库存调整表单 (Update Stock)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentDraft {
    pub product_id: Uuid,
    pub product_name: String,
    /// Shown as "Current Quantity"; never used in the calculation
    pub on_hand: i64,
    pub quantity: String,
    pub reason: MovementReason,
}

impl AdjustmentDraft {
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            on_hand: product.quantity_on_hand,
            quantity: String::new(),
            reason: MovementReason::default(),
        }
    }

    /// Signed change to send. A sale always removes stock; other reasons pass
    /// the entered sign through.
    pub fn change_quantity(&self) -> ApiResult<i64> {
        let entered = parse_leading_int(&self.quantity)
            .filter(|q| *q != 0)
            .ok_or_else(|| ApiError::validation(MSG_INVALID_QUANTITY))?;
        Ok(match self.reason {
            MovementReason::Sale => -entered.abs(),
            MovementReason::ShipmentReceived | MovementReason::Correction => entered,
        })
    }

    pub fn validate(&self) -> ApiResult<MovementRequest> {
        Ok(MovementRequest {
            product_id: self.product_id,
            change_quantity: self.change_quantity()?,
            reason: self.reason,
        })
    }
}

pub async fn submit_adjustment<C: HttpClient, S: KeyValueStore>(
    api: &InventoryApi<C, S>,
    movement: MovementRequest,
) -> ApiResult<Product> {
    api.move_inventory(movement).await
}
