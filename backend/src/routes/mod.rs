//! Route definitions for the AgriNova API

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // AI advisory functions
        .nest("/functions", function_routes())
        // Location search, language chooser and form options
        .route("/geocode", get(handlers::geocode))
        .route("/languages", get(handlers::list_languages))
        .route("/catalog", get(handlers::get_catalog))
        // Crop planner
        .nest("/crop-events", crop_event_routes())
        .nest("/notifications", notification_routes())
        // Hardware store
        .nest("/store", store_routes())
        // Pest history
        .nest("/pest-detections", pest_routes())
}

/// AI advisory function routes
fn function_routes() -> Router<AppState> {
    Router::new()
        .route("/crop-advisor", post(handlers::crop_advisor))
        .route("/crop-health-scanner", post(handlers::crop_health_scanner))
        .route("/crop-simulator", post(handlers::crop_simulator))
        .route("/harvest-predictor", post(handlers::harvest_predictor))
        .route("/market-advisor", post(handlers::market_advisor))
        .route("/weather-advisor", post(handlers::weather_advisor))
        .route("/identify-pest", post(handlers::identify_pest))
}

/// Crop planner routes
fn crop_event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_crop_events).post(handlers::create_crop_event),
        )
        .route("/calendar", get(handlers::get_calendar))
        .route("/upcoming", get(handlers::get_upcoming))
        .route(
            "/:id",
            get(handlers::get_crop_event)
                .put(handlers::update_crop_event)
                .delete(handlers::delete_crop_event),
        )
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_notifications))
        .route("/unread-count", get(handlers::get_unread_count))
        .route("/mark-all-read", post(handlers::mark_all_as_read))
        .route("/:id/read", post(handlers::mark_as_read))
        .route("/:id", delete(handlers::delete_notification))
}

/// Hardware store routes
fn store_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/quote", post(handlers::quote_cart))
        .route("/checkout", post(handlers::checkout))
}

/// Pest detection history routes
fn pest_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_pest_detections))
        .route(
            "/:id",
            get(handlers::get_pest_detection).delete(handlers::delete_pest_detection),
        )
}
