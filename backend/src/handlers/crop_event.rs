//! HTTP handlers for the crop planner

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use serde::Deserialize;
use shared::calendar::CalendarMonth;
use shared::{CropEvent, CropEventInput};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::services::crop_event::{CropEventFilter, CropEventSaved};
use crate::AppState;

// ============================================================================
// Events
// ============================================================================

/// List events, optionally filtered by type, crop name and date range
pub async fn list_crop_events(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<CropEventFilter>,
) -> AppResult<Json<Vec<CropEvent>>> {
    let events = state.crop_events().list(filter).await?;
    Ok(Json(events))
}

pub async fn get_crop_event(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<CropEvent>> {
    Ok(Json(state.crop_events().get(id).await?))
}

pub async fn create_crop_event(
    State(state): State<AppState>,
    AppJson(input): AppJson<CropEventInput>,
) -> AppResult<(StatusCode, Json<CropEventSaved>)> {
    let saved = state.crop_events().create(input).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update_crop_event(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<CropEventInput>,
) -> AppResult<Json<CropEventSaved>> {
    Ok(Json(state.crop_events().update(id, input).await?))
}

pub async fn delete_crop_event(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    state.crop_events().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Calendar
// ============================================================================

/// Query parameters for the month view; both default to the current month
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

pub async fn get_calendar(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CalendarQuery>,
) -> AppResult<Json<CalendarMonth>> {
    let service = state.crop_events();
    let today = service.local_now().date();

    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    Ok(Json(service.calendar(year, month).await?))
}

/// Events in the coming week
pub async fn get_upcoming(State(state): State<AppState>) -> AppResult<Json<Vec<CropEvent>>> {
    Ok(Json(state.crop_events().upcoming().await?))
}
