//! Weather API client for fetching farm conditions
//!
//! Integrates with the Open-Meteo forecast API (no API key) for current
//! conditions and today's forecast at a GPS position.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m,uv_index";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max,uv_index_max";

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

/// Current conditions as shown on the weather card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub conditions: String,
    pub weather_code: Option<i32>,
    pub wind_speed: Option<f64>,
    pub uv_index: Option<f64>,
    pub precipitation: Option<f64>,
}

/// Today's forecast summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodayForecast {
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub precipitation_chance: Option<f64>,
    pub precipitation_sum: Option<f64>,
}

/// Everything the weather advisor needs for one location
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub today: TodayForecast,
}

/// Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
    daily: OpenMeteoDaily,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<i32>,
    wind_speed_10m: Option<f64>,
    uv_index: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenMeteoDaily {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

fn first(values: &[Option<f64>]) -> Option<f64> {
    values.first().copied().flatten()
}

/// Human-readable description of a WMO weather interpretation code
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

impl WeatherClient {
    /// Create a new WeatherClient against the given forecast endpoint
    pub fn new(forecast_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: forecast_url.to_string(),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(&format!("{}/v1/forecast", base_url.trim_end_matches('/')))
    }

    /// Fetch current conditions and today's forecast by GPS coordinates
    pub async fn get_conditions(&self, latitude: f64, longitude: f64) -> AppResult<WeatherSnapshot> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Weather API request failed: {}", e);
                AppError::ExternalService("Failed to fetch weather data".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Weather API error: {} - {}", status, body);
            return Err(AppError::ExternalService(
                "Failed to fetch weather data".to_string(),
            ));
        }

        let data: OpenMeteoResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(Self::convert_response(data))
    }

    /// Convert the Open-Meteo response to our format
    fn convert_response(data: OpenMeteoResponse) -> WeatherSnapshot {
        let current = data.current;
        let daily = data.daily;

        WeatherSnapshot {
            current: CurrentConditions {
                temperature: current.temperature_2m,
                humidity: current.relative_humidity_2m,
                conditions: current
                    .weather_code
                    .map(describe_weather_code)
                    .unwrap_or("Unknown")
                    .to_string(),
                weather_code: current.weather_code,
                wind_speed: current.wind_speed_10m,
                uv_index: current.uv_index,
                precipitation: current.precipitation,
            },
            today: TodayForecast {
                high: first(&daily.temperature_2m_max),
                low: first(&daily.temperature_2m_min),
                precipitation_chance: first(&daily.precipitation_probability_max),
                precipitation_sum: first(&daily.precipitation_sum),
            },
        }
    }
}

fn or_na(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}

impl WeatherSnapshot {
    /// Conditions block for the advisor prompt
    pub fn prompt_block(&self, location: &str) -> String {
        let c = &self.current;
        let t = &self.today;
        format!(
            "Current weather in {location}:\n\
             - Temperature: {}°C\n\
             - Humidity: {}%\n\
             - Conditions: {}\n\
             - Wind Speed: {} km/h\n\
             - UV Index: {}\n\
             - Current Precipitation: {} mm\n\
             \n\
             Today's forecast:\n\
             - High: {}°C, Low: {}°C\n\
             - Precipitation chance: {}%\n\
             - Expected rain: {} mm",
            or_na(c.temperature),
            or_na(c.humidity),
            c.conditions,
            or_na(c.wind_speed),
            or_na(c.uv_index),
            or_na(c.precipitation),
            or_na(t.high),
            or_na(t.low),
            or_na(t.precipitation_chance),
            or_na(t.precipitation_sum),
        )
    }
}
