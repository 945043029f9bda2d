//! HTTP handlers for the AI advisory functions
//!
//! Each handler takes the camelCase form body posted by the web client and
//! returns the model's structured reply.

use axum::{extract::State, Json};
use serde_json::Value;
use shared::{
    CropAdvisorRequest, CropHealthRequest, CropSimulatorRequest, HarvestPredictorRequest,
    IdentifyPestRequest, MarketAdvisorRequest, PestResult, WeatherAdvisorRequest,
};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::advisor::{CropAdvice, WeatherAdvice};
use crate::AppState;

/// Daily crop advice
pub async fn crop_advisor(
    State(state): State<AppState>,
    AppJson(req): AppJson<CropAdvisorRequest>,
) -> AppResult<Json<CropAdvice>> {
    let advice = state.advisor().crop_advice(req).await?;
    Ok(Json(advice))
}

/// Crop health scan from a photo
pub async fn crop_health_scanner(
    State(state): State<AppState>,
    AppJson(req): AppJson<CropHealthRequest>,
) -> AppResult<Json<Value>> {
    Ok(Json(state.advisor().scan_crop_health(req).await?))
}

pub async fn crop_simulator(
    State(state): State<AppState>,
    AppJson(req): AppJson<CropSimulatorRequest>,
) -> AppResult<Json<Value>> {
    Ok(Json(state.advisor().simulate_crop(req).await?))
}

pub async fn harvest_predictor(
    State(state): State<AppState>,
    AppJson(req): AppJson<HarvestPredictorRequest>,
) -> AppResult<Json<Value>> {
    Ok(Json(state.advisor().predict_harvest(req).await?))
}

pub async fn market_advisor(
    State(state): State<AppState>,
    AppJson(req): AppJson<MarketAdvisorRequest>,
) -> AppResult<Json<Value>> {
    Ok(Json(state.advisor().analyze_market(req).await?))
}

/// Current weather, today's forecast and advice for the day
pub async fn weather_advisor(
    State(state): State<AppState>,
    AppJson(req): AppJson<WeatherAdvisorRequest>,
) -> AppResult<Json<WeatherAdvice>> {
    let advice = state.advisor().weather_advice(req).await?;
    Ok(Json(advice))
}

/// Pest identification; parsed results are added to the pest history
pub async fn identify_pest(
    State(state): State<AppState>,
    AppJson(req): AppJson<IdentifyPestRequest>,
) -> AppResult<Json<PestResult>> {
    Ok(Json(state.advisor().identify_pest(req).await?))
}
