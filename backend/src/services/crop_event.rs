//! Crop planner service
//!
//! Supports:
//! - Planting, watering and harvest events with derived titles
//! - Month views and the upcoming-this-week panel
//! - Reminder notifications, due the day before at 09:00 farmer time

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use shared::calendar::{self, CalendarMonth};
use shared::{
    event_title, reminder_message, same_day_reminder_message, scheduled_message,
    updated_message, CropEvent, CropEventInput, EventType,
};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::error::{AppError, AppResult};

/// Crop planner service
#[derive(Clone)]
pub struct CropEventService {
    db: PgPool,
    utc_offset: Duration,
    upcoming_limit: usize,
}

/// Database row for a crop event
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CropEventRow {
    pub id: Uuid,
    pub title: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub crop_name: String,
    pub notes: Option<String>,
    pub reminder: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CropEventRow> for CropEvent {
    type Error = AppError;

    fn try_from(r: CropEventRow) -> Result<Self, Self::Error> {
        let event_type: EventType = r
            .event_type
            .parse()
            .map_err(|e: String| AppError::Internal(e))?;

        Ok(CropEvent {
            id: r.id,
            title: r.title,
            date: r.event_date,
            event_type,
            crop_name: r.crop_name,
            notes: r.notes,
            reminder: r.reminder,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Saved event plus the confirmation shown to the farmer
#[derive(Debug, Clone, Serialize)]
pub struct CropEventSaved {
    pub event: CropEvent,
    pub message: String,
}

/// Query filters for listing events
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropEventFilter {
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub crop_name: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

const EVENT_COLUMNS: &str =
    "id, title, event_date, event_type, crop_name, notes, reminder, created_at, updated_at";

fn rows_to_events(rows: Vec<CropEventRow>) -> AppResult<Vec<CropEvent>> {
    rows.into_iter().map(CropEvent::try_from).collect()
}

impl CropEventService {
    pub fn new(db: PgPool, planner: &PlannerConfig) -> Self {
        Self {
            db,
            utc_offset: Duration::minutes(planner.utc_offset_minutes as i64),
            upcoming_limit: planner.upcoming_limit,
        }
    }

    /// Current wall-clock time for the farmer
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().naive_utc() + self.utc_offset
    }

    /// Instant the reminder for an event on `date` falls due
    pub fn reminder_at(&self, date: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&(calendar::reminder_time(date) - self.utc_offset))
    }

    /// When and how to remind the farmer about an event on `date`
    ///
    /// Past events get no reminder. An event later today keeps its overdue
    /// reminder time, so the reminder is due at once, and says "today".
    pub fn plan_reminder(
        &self,
        title: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Option<(DateTime<Utc>, String)> {
        let today = (now.naive_utc() + self.utc_offset).date();
        if date < today {
            return None;
        }

        let message = if date == today {
            same_day_reminder_message(title, date)
        } else {
            reminder_message(title, date)
        };
        Some((self.reminder_at(date), message))
    }

    /// List events, soonest first
    pub async fn list(&self, filter: CropEventFilter) -> AppResult<Vec<CropEvent>> {
        let crop_name = filter
            .crop_name
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!("%{}%", c));

        let rows = sqlx::query_as::<_, CropEventRow>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM crop_events
            WHERE ($1::text IS NULL OR event_type = $1)
              AND ($2::text IS NULL OR crop_name ILIKE $2)
              AND ($3::date IS NULL OR event_date >= $3)
              AND ($4::date IS NULL OR event_date <= $4)
            ORDER BY event_date ASC, created_at ASC
            "#
        ))
        .bind(filter.event_type.map(|t| t.as_str()))
        .bind(crop_name)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.db)
        .await?;

        rows_to_events(rows)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<CropEvent> {
        let row = sqlx::query_as::<_, CropEventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM crop_events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Crop event".to_string()))?;

        row.try_into()
    }

    /// Schedule a new event
    pub async fn create(&self, input: CropEventInput) -> AppResult<CropEventSaved> {
        input.check()?;
        let input = input.normalized();
        let title = event_title(input.event_type, &input.crop_name);

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, CropEventRow>(&format!(
            r#"
            INSERT INTO crop_events (title, event_date, event_type, crop_name, notes, reminder)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&title)
        .bind(input.date)
        .bind(input.event_type.as_str())
        .bind(&input.crop_name)
        .bind(&input.notes)
        .bind(input.reminder)
        .fetch_one(&mut *tx)
        .await?;

        if input.reminder {
            self.schedule_reminder(&mut tx, row.id, &title, input.date)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(event_id = %row.id, title = %title, date = %input.date, "Crop event created");

        Ok(CropEventSaved {
            event: row.try_into()?,
            message: scheduled_message(&input),
        })
    }

    /// Replace an event's fields and reschedule its reminder
    pub async fn update(&self, id: Uuid, input: CropEventInput) -> AppResult<CropEventSaved> {
        input.check()?;
        let input = input.normalized();
        let title = event_title(input.event_type, &input.crop_name);

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, CropEventRow>(&format!(
            r#"
            UPDATE crop_events
            SET title = $2, event_date = $3, event_type = $4, crop_name = $5,
                notes = $6, reminder = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&title)
        .bind(input.date)
        .bind(input.event_type.as_str())
        .bind(&input.crop_name)
        .bind(&input.notes)
        .bind(input.reminder)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Crop event".to_string()))?;

        // Pending reminders always follow the latest date
        sqlx::query("DELETE FROM notifications WHERE crop_event_id = $1 AND is_read = false")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if input.reminder {
            self.schedule_reminder(&mut tx, id, &title, input.date)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(event_id = %id, title = %title, "Crop event updated");

        Ok(CropEventSaved {
            event: row.try_into()?,
            message: updated_message(&input),
        })
    }

    /// Delete an event together with its reminders
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM crop_events WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Crop event".to_string()));
        }

        tracing::info!(event_id = %id, "Crop event deleted");
        Ok(())
    }

    /// Month view with events placed on their days
    pub async fn calendar(&self, year: i32, month: u32) -> AppResult<CalendarMonth> {
        let grid = calendar::month_grid(year, month).ok_or_else(|| AppError::Validation {
            field: "month".to_string(),
            message: "Month must be between 1 and 12".to_string(),
        })?;

        let (first, last) = match (grid.first(), grid.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(AppError::Internal("Empty calendar grid".to_string())),
        };

        let events = self
            .list(CropEventFilter {
                from: Some(first),
                to: Some(last),
                ..Default::default()
            })
            .await?;

        let today = self.local_now().date();
        calendar::build_month(year, month, &events, today).ok_or_else(|| {
            AppError::Internal(format!("Could not build calendar for {}-{}", year, month))
        })
    }

    /// Events in the coming week, soonest first
    pub async fn upcoming(&self) -> AppResult<Vec<CropEvent>> {
        let now = self.local_now();
        let today = now.date();

        let events = self
            .list(CropEventFilter {
                from: Some(today),
                to: Some(today + Duration::days(calendar::UPCOMING_WINDOW_DAYS)),
                ..Default::default()
            })
            .await?;

        Ok(calendar::upcoming(&events, now, self.upcoming_limit))
    }

    async fn schedule_reminder(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        title: &str,
        date: NaiveDate,
    ) -> AppResult<()> {
        let Some((remind_at, message)) = self.plan_reminder(title, date, Utc::now()) else {
            tracing::debug!(event_id = %event_id, date = %date, "Event already past, no reminder");
            return Ok(());
        };

        sqlx::query(
            r#"
            INSERT INTO notifications (message, crop_event_id, remind_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(message)
        .bind(event_id)
        .bind(remind_at)
        .execute(&mut **tx)
        .await?;

        tracing::debug!(event_id = %event_id, remind_at = %remind_at, "Reminder scheduled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service(offset_minutes: i32) -> CropEventService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/agrinova_test")
            .unwrap();
        CropEventService::new(
            pool,
            &PlannerConfig {
                utc_offset_minutes: offset_minutes,
                upcoming_limit: 5,
            },
        )
    }

    fn row(event_type: &str) -> CropEventRow {
        CropEventRow {
            id: Uuid::new_v4(),
            title: "Harvest Wheat".into(),
            event_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            event_type: event_type.into(),
            crop_name: "Wheat".into(),
            notes: Some("North field".into()),
            reminder: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_to_event() {
        let r = row("harvest");
        let event = CropEvent::try_from(r.clone()).unwrap();
        assert_eq!(event.id, r.id);
        assert_eq!(event.date, r.event_date);
        assert_eq!(event.event_type, EventType::Harvest);
        assert_eq!(event.notes.as_deref(), Some("North field"));
    }

    #[test]
    fn test_row_with_unknown_type() {
        assert!(CropEvent::try_from(row("pruning")).is_err());
    }

    #[tokio::test]
    async fn test_reminder_at_uses_planner_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        // 09:00 IST on the 14th is 03:30 UTC
        let ist = service(330).reminder_at(date);
        assert_eq!(ist.to_rfc3339(), "2026-03-14T03:30:00+00:00");

        let utc = service(0).reminder_at(date);
        assert_eq!(utc.to_rfc3339(), "2026-03-14T09:00:00+00:00");
    }

    #[tokio::test]
    async fn test_reminder_plan_for_future_event() {
        let svc = service(330);
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 6, 0, 0).unwrap();

        let (at, message) = svc.plan_reminder("Planting Tomatoes", date, now).unwrap();
        assert_eq!(at, svc.reminder_at(date));
        assert!(message.contains("scheduled for tomorrow"));
    }

    #[tokio::test]
    async fn test_reminder_plan_when_reminder_time_passed() {
        let svc = service(330);
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        // 16:30 IST on the 14th: tomorrow's reminder is overdue
        let evening_before = Utc.with_ymd_and_hms(2026, 3, 14, 11, 0, 0).unwrap();
        let (at, message) = svc.plan_reminder("Harvest Wheat", date, evening_before).unwrap();
        assert!(at <= evening_before);
        assert!(message.contains("scheduled for tomorrow"));

        // 10:30 IST on the 15th: the event is today
        let same_day = Utc.with_ymd_and_hms(2026, 3, 15, 5, 0, 0).unwrap();
        let (at, message) = svc.plan_reminder("Harvest Wheat", date, same_day).unwrap();
        assert_eq!(at, svc.reminder_at(date));
        assert_eq!(
            message,
            "Reminder: Harvest Wheat is scheduled for today (Mar 15, 2026)."
        );
    }

    #[tokio::test]
    async fn test_no_reminder_for_past_event() {
        let svc = service(330);
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        // 00:30 IST on the 16th is still the 15th in UTC
        let next_day = Utc.with_ymd_and_hms(2026, 3, 15, 19, 0, 0).unwrap();
        assert!(svc.plan_reminder("Harvest Wheat", date, next_day).is_none());
    }

    #[test]
    fn test_filter_from_query() {
        let filter: CropEventFilter =
            serde_json::from_value(serde_json::json!({ "type": "watering", "from": "2026-03-01" }))
                .unwrap();
        assert_eq!(filter.event_type, Some(EventType::Watering));
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert!(filter.to.is_none());
    }

    #[test]
    fn test_filter_uses_body_keys() {
        let filter: CropEventFilter =
            serde_json::from_value(serde_json::json!({ "cropName": "Tomato" })).unwrap();
        assert_eq!(filter.crop_name.as_deref(), Some("Tomato"));
    }
}
