//! Hardware store cart pricing

use rust_decimal::Decimal;

use crate::models::{CartItem, CartQuote, HardwareProduct, QuoteLine};
use crate::validation::FieldError;

/// Price of one cart line: the device plus the cloud analytics add-on when selected
pub fn line_total(product: &HardwareProduct, with_cloud_analytics: bool) -> Decimal {
    let mut total = product.price_rupees;
    if with_cloud_analytics {
        if let Some(addon) = product.cloud_analytics_price {
            total += addon;
        }
    }
    total
}

/// Price a cart against the product catalogue
///
/// The add-on flag is ignored for products that do not offer cloud analytics.
pub fn quote(products: &[HardwareProduct], items: &[CartItem]) -> Result<CartQuote, FieldError> {
    if items.is_empty() {
        return Err(FieldError::new("items", "Your cart is empty"));
    }

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let product = products
            .iter()
            .find(|p| p.id == item.product_id)
            .ok_or_else(|| FieldError::new("items", format!("Product {} not found", item.product_id)))?;

        if !product.in_stock {
            return Err(FieldError::new(
                "items",
                format!("{} is out of stock", product.name),
            ));
        }

        let with_addon = item.with_cloud_analytics && product.has_cloud_analytics;
        lines.push(QuoteLine {
            product_id: product.id,
            name: product.name.clone(),
            with_cloud_analytics: with_addon,
            line_total: line_total(product, with_addon),
        });
    }

    let total: Decimal = lines.iter().map(|l| l.line_total).sum();
    Ok(CartQuote {
        lines,
        total,
        total_display: format_inr(total),
    })
}

/// Message shown when an order is placed
pub fn order_message(total: Decimal) -> String {
    format!(
        "Your order of {} has been placed. We'll contact you shortly.",
        format_inr(total)
    )
}

/// Format rupees with Indian digit grouping, e.g. `₹1,23,456` or `₹2,499.50`
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let whole = abs.trunc();
    let fraction = (abs - whole) * Decimal::from(100);
    let digits = whole.normalize().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('₹');
    out.push_str(&grouped);
    if !fraction.is_zero() {
        let cents = fraction.trunc().normalize().to_string();
        out.push('.');
        if cents.len() < 2 {
            out.push('0');
        }
        out.push_str(&cents);
    }
    out
}
