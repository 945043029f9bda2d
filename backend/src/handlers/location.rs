//! Location search, UI languages and form option lists

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::{Catalog, Language, CATALOG, LANGUAGES};

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::external::GeocodedPlace;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub name: String,
}

/// Resolve a typed place name to coordinates
pub async fn geocode(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<GeocodeQuery>,
) -> AppResult<Json<GeocodedPlace>> {
    Ok(Json(state.geocoding.search(&query.name).await?))
}

/// Languages offered by the language chooser
pub async fn list_languages() -> Json<&'static [Language]> {
    Json(LANGUAGES)
}

/// Crops, regions, seasons, irrigation and soil types for the advisory forms
pub async fn get_catalog() -> Json<Catalog> {
    Json(CATALOG)
}
