//! Hardware store service: sensor catalogue, cart quotes and checkout

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::store::{order_message, quote};
use shared::{
    require, CartItem, CartQuote, CreateProductInput, FieldError, HardwareProduct,
    OrderConfirmation, UpdateProductInput,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Store service
#[derive(Clone)]
pub struct StoreService {
    db: PgPool,
}

#[derive(Debug, Clone, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price_rupees: Decimal,
    image_url: Option<String>,
    category: String,
    has_cloud_analytics: bool,
    cloud_analytics_price: Option<Decimal>,
    in_stock: bool,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for HardwareProduct {
    fn from(r: ProductRow) -> Self {
        HardwareProduct {
            id: r.id,
            name: r.name,
            description: r.description,
            price_rupees: r.price_rupees,
            image_url: r.image_url,
            category: r.category,
            has_cloud_analytics: r.has_cloud_analytics,
            cloud_analytics_price: r.cloud_analytics_price,
            in_stock: r.in_stock,
            created_at: r.created_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, price_rupees, image_url, category, \
     has_cloud_analytics, cloud_analytics_price, in_stock, created_at";

fn check_price(field: &str, price: Option<Decimal>) -> Result<(), FieldError> {
    match price {
        Some(p) if p < Decimal::ZERO => {
            Err(FieldError::new(field, "Price cannot be negative"))
        }
        _ => Ok(()),
    }
}

/// Form rules for a new product
pub fn check_new_product(input: &CreateProductInput) -> Result<(), FieldError> {
    require("name", &input.name, "Product name is required")?;
    require("category", &input.category, "Category is required")?;
    check_price("price_rupees", Some(input.price_rupees))?;
    check_price("cloud_analytics_price", input.cloud_analytics_price)
}

/// Form rules for a partial product update
pub fn check_product_update(input: &UpdateProductInput) -> Result<(), FieldError> {
    if let Some(name) = input.name.as_deref() {
        require("name", name, "Product name is required")?;
    }
    if let Some(category) = input.category.as_deref() {
        require("category", category, "Category is required")?;
    }
    check_price("price_rupees", input.price_rupees)?;
    check_price("cloud_analytics_price", input.cloud_analytics_price)
}

impl StoreService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ========================================================================
    // Catalogue
    // ========================================================================

    /// In-stock products, cheapest first
    pub async fn list_products(&self) -> AppResult<Vec<HardwareProduct>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM hardware_products
            WHERE in_stock = true
            ORDER BY price_rupees ASC, name ASC
            "#
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_product(&self, id: Uuid) -> AppResult<HardwareProduct> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM hardware_products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<HardwareProduct> {
        check_new_product(&input)?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO hardware_products (
                name, description, price_rupees, image_url, category,
                has_cloud_analytics, cloud_analytics_price, in_stock
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(input.description.trim())
        .bind(input.price_rupees)
        .bind(&input.image_url)
        .bind(input.category.trim())
        .bind(input.has_cloud_analytics)
        .bind(input.cloud_analytics_price)
        .bind(input.in_stock)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(product_id = %row.id, name = %row.name, "Product created");
        Ok(row.into())
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<HardwareProduct> {
        check_product_update(&input)?;
        let existing = self.get_product(id).await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE hardware_products
            SET name = $2, description = $3, price_rupees = $4, image_url = $5,
                category = $6, has_cloud_analytics = $7, cloud_analytics_price = $8,
                in_stock = $9
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.name.map(|n| n.trim().to_string()).unwrap_or(existing.name))
        .bind(input.description.unwrap_or(existing.description))
        .bind(input.price_rupees.unwrap_or(existing.price_rupees))
        .bind(input.image_url.or(existing.image_url))
        .bind(input.category.map(|c| c.trim().to_string()).unwrap_or(existing.category))
        .bind(input.has_cloud_analytics.unwrap_or(existing.has_cloud_analytics))
        .bind(input.cloud_analytics_price.or(existing.cloud_analytics_price))
        .bind(input.in_stock.unwrap_or(existing.in_stock))
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(row.into())
    }

    pub async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM hardware_products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    // ========================================================================
    // Cart
    // ========================================================================

    /// Price a cart against the current catalogue
    pub async fn quote(&self, items: &[CartItem]) -> AppResult<CartQuote> {
        if items.is_empty() {
            return Err(FieldError::new("items", "Your cart is empty").into());
        }

        let ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM hardware_products WHERE id = ANY($1)"
        ))
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let products: Vec<HardwareProduct> = rows.into_iter().map(Into::into).collect();
        Ok(quote(&products, items)?)
    }

    /// Place an order for the cart
    ///
    /// Orders are confirmed to the farmer but not stored.
    pub async fn checkout(&self, items: &[CartItem]) -> AppResult<OrderConfirmation> {
        let priced = self.quote(items).await?;

        tracing::info!(
            lines = priced.lines.len(),
            total = %priced.total,
            "Order placed"
        );

        Ok(OrderConfirmation {
            total: priced.total,
            message: order_message(priced.total),
        })
    }
}
