//! HTTP handlers for the pest detection history

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::PestDetection;
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::services::PestHistoryService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PestHistoryQuery {
    pub limit: Option<i64>,
}

/// Most recent detections first
pub async fn list_pest_detections(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PestHistoryQuery>,
) -> AppResult<Json<Vec<PestDetection>>> {
    let history = PestHistoryService::new(state.db).list(query.limit).await?;
    Ok(Json(history))
}

pub async fn get_pest_detection(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<PestDetection>> {
    Ok(Json(PestHistoryService::new(state.db).get(id).await?))
}

pub async fn delete_pest_detection(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    PestHistoryService::new(state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
