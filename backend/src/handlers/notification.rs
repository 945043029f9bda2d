//! HTTP handlers for planner notifications

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::Notification;
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::services::NotificationService;
use crate::AppState;

/// Query parameters for listing notifications
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: i64,
}

/// Due notifications, newest first
pub async fn get_notifications(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListNotificationsQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let service = NotificationService::new(state.db);
    let notifications = service
        .list(query.unread_only.unwrap_or(false), query.limit)
        .await?;
    Ok(Json(notifications))
}

pub async fn get_unread_count(State(state): State<AppState>) -> AppResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.db);
    let count = service.unread_count().await?;
    Ok(Json(UnreadCountResponse { count }))
}

pub async fn mark_as_read(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    NotificationService::new(state.db).mark_read(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_as_read(
    State(state): State<AppState>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let updated = NotificationService::new(state.db).mark_all_read().await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    NotificationService::new(state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
