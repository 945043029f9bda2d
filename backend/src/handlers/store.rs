//! HTTP handlers for the hardware store

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{
    CartItem, CartQuote, CreateProductInput, HardwareProduct, OrderConfirmation,
    UpdateProductInput,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::services::StoreService;
use crate::AppState;

/// Cart body for quotes and checkout
#[derive(Debug, Deserialize)]
pub struct CartRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

// ============================================================================
// Products
// ============================================================================

/// In-stock products, cheapest first
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<HardwareProduct>>> {
    let products = StoreService::new(state.db).list_products().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<HardwareProduct>> {
    Ok(Json(StoreService::new(state.db).get_product(id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProductInput>,
) -> AppResult<(StatusCode, Json<HardwareProduct>)> {
    let product = StoreService::new(state.db).create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<UpdateProductInput>,
) -> AppResult<Json<HardwareProduct>> {
    Ok(Json(StoreService::new(state.db).update_product(id, input).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    StoreService::new(state.db).delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Cart
// ============================================================================

pub async fn quote_cart(
    State(state): State<AppState>,
    AppJson(cart): AppJson<CartRequest>,
) -> AppResult<Json<CartQuote>> {
    Ok(Json(StoreService::new(state.db).quote(&cart.items).await?))
}

pub async fn checkout(
    State(state): State<AppState>,
    AppJson(cart): AppJson<CartRequest>,
) -> AppResult<Json<OrderConfirmation>> {
    Ok(Json(StoreService::new(state.db).checkout(&cart.items).await?))
}
