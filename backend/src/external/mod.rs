//! External API integrations

pub mod ai_gateway;
pub mod geocoding;
pub mod weather;

pub use ai_gateway::{AiGatewayClient, ChatMessage, ChatRequest};
pub use geocoding::{GeocodedPlace, GeocodingClient};
pub use weather::{WeatherClient, WeatherSnapshot};
