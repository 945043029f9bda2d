//! AgriNova advisory platform backend
//!
//! An HTTP JSON API for farmers: AI crop advice, pest identification,
//! weather-driven recommendations, a crop planner with reminders and a
//! hardware store.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::{AiGatewayClient, GeocodingClient, WeatherClient};
use services::{AdvisorService, CropEventService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub ai: AiGatewayClient,
    pub weather: WeatherClient,
    pub geocoding: GeocodingClient,
}

impl AppState {
    /// Build the state and its outbound clients from configuration
    pub fn new(db: sqlx::PgPool, config: Config) -> Self {
        Self {
            ai: AiGatewayClient::new(&config.ai_gateway),
            weather: WeatherClient::new(&config.weather.forecast_url),
            geocoding: GeocodingClient::new(&config.weather.geocoding_url),
            db,
            config: Arc::new(config),
        }
    }

    pub fn advisor(&self) -> AdvisorService {
        AdvisorService::new(self.ai.clone(), self.weather.clone(), self.db.clone())
    }

    pub fn crop_events(&self) -> CropEventService {
        CropEventService::new(self.db.clone(), &self.config.planner)
    }
}

/// Largest accepted request body: a base64-encoded image at the upload
/// limit plus room for the rest of the form
pub const MAX_BODY_BYTES: usize = shared::MAX_IMAGE_BYTES / 3 * 4 + 1024 * 1024;

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // The browser client calls from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgriNova Advisory Platform API v1.0"
}

/// Liveness probe
async fn health_check() -> &'static str {
    "OK"
}
