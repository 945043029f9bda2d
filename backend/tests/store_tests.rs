//! Hardware store integration tests
//!
//! Tests for the storefront including:
//! - Property: Cart Total (the total is the sum of the line totals)
//! - Property: Add-on Pricing (cloud analytics only where offered)
//! - Rupee display formatting
//! - Empty carts rejected through the router

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{send, test_app};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;
use shared::store::{format_inr, line_total, order_message, quote};
use shared::{CartItem, HardwareProduct};
use std::str::FromStr;
use uuid::Uuid;
use wiremock::MockServer;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product(price: &str, addon: Option<&str>) -> HardwareProduct {
    HardwareProduct {
        id: Uuid::new_v4(),
        name: "Soil Moisture Sensor".to_string(),
        description: String::new(),
        price_rupees: dec(price),
        image_url: None,
        category: "Sensors".to_string(),
        has_cloud_analytics: addon.is_some(),
        cloud_analytics_price: addon.map(dec),
        in_stock: true,
        created_at: Utc::now(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_quote_mixed_cart() {
        let sensor = product("1499", Some("299"));
        let tester = product("3499", None);
        let items = vec![
            CartItem { product_id: sensor.id, with_cloud_analytics: true },
            CartItem { product_id: tester.id, with_cloud_analytics: true },
        ];

        let priced = quote(&[sensor, tester], &items).unwrap();

        assert_eq!(priced.lines[0].line_total, dec("1798"));
        assert!(!priced.lines[1].with_cloud_analytics);
        assert_eq!(priced.total, dec("5297"));
        assert_eq!(priced.total_display, "₹5,297");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(dec("999")), "₹999");
        assert_eq!(format_inr(dec("123456")), "₹1,23,456");
        assert_eq!(format_inr(dec("12345678")), "₹1,23,45,678");
    }

    #[test]
    fn test_order_message_mentions_total() {
        assert!(order_message(dec("8999")).contains("₹8,999"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn product_strategy() -> impl Strategy<Value = HardwareProduct> {
        (1u32..50_000, prop::option::of(0u32..2_000)).prop_map(|(price, addon)| {
            product(&price.to_string(), addon.map(|a| a.to_string()).as_deref())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Cart Total
        #[test]
        fn prop_total_is_sum_of_lines(
            products in prop::collection::vec(product_strategy(), 1..6),
            flags in prop::collection::vec(any::<bool>(), 6),
        ) {
            let items: Vec<CartItem> = products
                .iter()
                .zip(flags.iter())
                .map(|(p, f)| CartItem { product_id: p.id, with_cloud_analytics: *f })
                .collect();

            let priced = quote(&products, &items).unwrap();
            let sum: Decimal = priced.lines.iter().map(|l| l.line_total).sum();

            prop_assert_eq!(priced.total, sum);
            prop_assert_eq!(priced.lines.len(), items.len());
        }

        /// Property: Add-on Pricing
        #[test]
        fn prop_addon_only_when_offered(p in product_strategy(), with_addon in any::<bool>()) {
            let total = line_total(&p, with_addon);

            match (with_addon, p.cloud_analytics_price) {
                (true, Some(addon)) => prop_assert_eq!(total, p.price_rupees + addon),
                _ => prop_assert_eq!(total, p.price_rupees),
            }
        }
    }
}

// ============================================================================
// Router validation (no database needed)
// ============================================================================

#[cfg(test)]
mod router {
    use super::*;

    #[tokio::test]
    async fn test_empty_checkout_rejected() {
        let server = MockServer::start().await;

        let (status, body) = send(
            test_app(&server.uri()),
            "POST",
            "/api/v1/store/checkout",
            Some(json!({ "items": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "items");
        assert_eq!(body["error"]["message"], "Your cart is empty");
    }

    #[tokio::test]
    async fn test_blank_product_name_rejected() {
        let server = MockServer::start().await;

        let (status, body) = send(
            test_app(&server.uri()),
            "POST",
            "/api/v1/store/products",
            Some(json!({ "name": " ", "price_rupees": "1499", "category": "Sensors" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "name");
    }
}
