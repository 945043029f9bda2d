//! Hardware storefront models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sensor or device listed in the hardware store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HardwareProduct {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_rupees: Decimal,
    pub image_url: Option<String>,
    pub category: String,
    pub has_cloud_analytics: bool,
    pub cloud_analytics_price: Option<Decimal>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for listing a new product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_rupees: Decimal,
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub has_cloud_analytics: bool,
    pub cloud_analytics_price: Option<Decimal>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// Partial product update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_rupees: Option<Decimal>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub has_cloud_analytics: Option<bool>,
    pub cloud_analytics_price: Option<Decimal>,
    pub in_stock: Option<bool>,
}

/// One line of a shopping cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: Uuid,
    #[serde(default)]
    pub with_cloud_analytics: bool,
}

/// Priced cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteLine {
    pub product_id: Uuid,
    pub name: String,
    pub with_cloud_analytics: bool,
    pub line_total: Decimal,
}

/// Priced cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartQuote {
    pub lines: Vec<QuoteLine>,
    pub total: Decimal,
    pub total_display: String,
}

/// Result of placing an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub total: Decimal,
    pub message: String,
}
