//! Notification service for planner reminders
//!
//! Supports:
//! - Listing due notifications, optionally unread only
//! - Unread badge count
//! - Marking one or all notifications as read
//! - Deleting a notification

use chrono::{DateTime, Utc};
use shared::Notification;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Default and maximum page size for the notification list
pub const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;
pub const MAX_NOTIFICATION_LIMIT: i64 = 200;

/// Notification service
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct NotificationRow {
    id: Uuid,
    message: String,
    is_read: bool,
    crop_event_id: Option<Uuid>,
    remind_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

impl From<NotificationRow> for Notification {
    fn from(r: NotificationRow) -> Self {
        Notification {
            id: r.id,
            message: r.message,
            is_read: r.is_read,
            crop_event_id: r.crop_event_id,
            remind_at: r.remind_at,
            created_at: r.created_at,
            read_at: r.read_at,
        }
    }
}

impl NotificationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Notifications whose reminder time has passed, newest first
    pub async fn list(&self, unread_only: bool, limit: Option<i64>) -> AppResult<Vec<Notification>> {
        let limit = limit
            .unwrap_or(DEFAULT_NOTIFICATION_LIMIT)
            .clamp(1, MAX_NOTIFICATION_LIMIT);

        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, message, is_read, crop_event_id, remind_at, created_at, read_at
            FROM notifications
            WHERE remind_at <= NOW()
              AND ($1 = false OR is_read = false)
            ORDER BY remind_at DESC
            LIMIT $2
            "#,
        )
        .bind(unread_only)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Number of due, unread notifications
    pub async fn unread_count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM notifications
            WHERE remind_at <= NOW() AND is_read = false
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    // ========================================================================
    // Read state
    // ========================================================================

    pub async fn mark_read(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = true, read_at = COALESCE(read_at, NOW())
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notification".to_string()));
        }

        Ok(())
    }

    /// Mark every due notification as read, returning how many changed
    pub async fn mark_all_read(&self) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = true, read_at = NOW()
            WHERE is_read = false AND remind_at <= NOW()
            "#,
        )
        .execute(&self.db)
        .await?;

        tracing::debug!("Marked {} notifications as read", result.rows_affected());
        Ok(result.rows_affected() as i64)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notification".to_string()));
        }

        Ok(())
    }
}
