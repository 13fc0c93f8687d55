//! Catalog and configuration entities
//!
//! Categories, products, payment methods, banners, per-category checkout
//! input fields, and the single-row store profile. These are the producers
//! of the snapshot fields embedded into orders and deposits.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
    pub total_sold: i64,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    /// Denomination label shown to the buyer, e.g. "1000 UC"
    pub amount: String,
    pub price: i64,
    pub currency: String,
    pub total_sold: i64,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub instructions: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Banner {
    pub id: i64,
    pub image_file_id: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// A checkout form field collected for orders in one category,
/// e.g. "Player ID" for a game that needs it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InputField {
    pub id: i64,
    pub category_id: i64,
    pub field_key: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub sort_order: i32,
}

/// Single-row store settings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoreProfile {
    pub id: i32,
    pub store_name: String,
    pub welcome_text: Option<String>,
    pub support_contact: Option<String>,
    pub maintenance_mode: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertCategoryRequest {
    pub name: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProductRequest {
    pub category_id: i64,
    pub name: String,
    pub amount: String,
    pub price: i64,
    pub currency: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPaymentMethodRequest {
    pub name: String,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub instructions: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertBannerRequest {
    pub image_file_id: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertInputFieldRequest {
    pub category_id: i64,
    pub field_key: String,
    pub label: String,
    pub placeholder: Option<String>,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStoreProfileRequest {
    pub store_name: Option<String>,
    pub welcome_text: Option<String>,
    pub support_contact: Option<String>,
    pub maintenance_mode: Option<bool>,
}

fn default_true() -> bool {
    true
}
