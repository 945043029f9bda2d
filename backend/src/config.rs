//! Configuration management for the AgriNova advisory platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRINOVA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// AI gateway configuration
    pub ai_gateway: AiGatewayConfig,

    /// Open-Meteo endpoints
    pub weather: WeatherConfig,

    /// Crop planner settings
    pub planner: PlannerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiGatewayConfig {
    /// Gateway root, `/v1/chat/completions` is appended
    pub base_url: String,

    /// Bearer key; the advisory endpoints refuse to run without it
    #[serde(default)]
    pub api_key: Option<String>,

    /// Text model
    pub model: String,

    /// Model used for image analysis
    pub vision_model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Open-Meteo forecast endpoint
    pub forecast_url: String,

    /// Open-Meteo geocoding search endpoint
    pub geocoding_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Farmer's offset from UTC in minutes, used to place reminders
    pub utc_offset_minutes: i32,

    /// Events returned by the upcoming panel
    pub upcoming_limit: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRINOVA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("ai_gateway.base_url", "https://ai.gateway.lovable.dev")?
            .set_default("ai_gateway.model", "google/gemini-3-flash-preview")?
            .set_default("ai_gateway.vision_model", "google/gemini-2.5-flash")?
            .set_default("ai_gateway.timeout_secs", 60)?
            .set_default("weather.forecast_url", "https://api.open-meteo.com/v1/forecast")?
            .set_default(
                "weather.geocoding_url",
                "https://geocoding-api.open-meteo.com/v1/search",
            )?
            .set_default("planner.utc_offset_minutes", 330)?
            .set_default("planner.upcoming_limit", 5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRINOVA_ prefix)
            .add_source(
                Environment::with_prefix("AGRINOVA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl AiGatewayConfig {
    /// The API key, if one is configured and not blank
    pub fn key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 330,
            upcoming_limit: shared::calendar::DEFAULT_UPCOMING_LIMIT,
        }
    }
}
