//! Place-name search through the Open-Meteo geocoding API

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Geocoding client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

/// A resolved place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodedPlace {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// "{name}, {country}" as shown in the location field
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<SearchResult> for GeocodedPlace {
    fn from(r: SearchResult) -> Self {
        let label = match r.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", r.name, country),
            _ => r.name.clone(),
        };
        Self {
            name: r.name,
            country: r.country,
            latitude: r.latitude,
            longitude: r.longitude,
            label,
        }
    }
}

impl GeocodingClient {
    pub fn new(search_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: search_url.to_string(),
        }
    }

    /// Create a client with custom base URL (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(&format!("{}/v1/search", base_url.trim_end_matches('/')))
    }

    /// Best match for a place name
    pub async fn search(&self, name: &str) -> AppResult<GeocodedPlace> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Please enter a location".to_string(),
            });
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", name), ("count", "1")])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalService(format!(
                "Geocoding API returned {}",
                status
            )));
        }

        let data: SearchResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse geocoding response: {}", e))
        })?;

        let place: GeocodedPlace = data
            .results
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Location".to_string()))?;

        tracing::info!("Geocoded {} to {}", name, place.label);
        Ok(place)
    }
}
