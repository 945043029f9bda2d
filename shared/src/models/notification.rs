//! In-app notification models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A planner reminder or other in-app message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub is_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_event_id: Option<Uuid>,
    pub remind_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// A notification is shown once its reminder time has passed
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.remind_at <= now
    }
}

/// Reminder text for a crop event, e.g. "Reminder: Planting Tomatoes is scheduled for tomorrow (Mar 14, 2026)."
pub fn reminder_message(title: &str, date: chrono::NaiveDate) -> String {
    format!(
        "Reminder: {} is scheduled for tomorrow ({}).",
        title,
        date.format("%b %-d, %Y")
    )
}

/// Reminder text for an event later today, when the day-before reminder time has passed
pub fn same_day_reminder_message(title: &str, date: chrono::NaiveDate) -> String {
    format!(
        "Reminder: {} is scheduled for today ({}).",
        title,
        date.format("%b %-d, %Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_reminder_message() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(
            reminder_message("Planting Tomatoes", date),
            "Reminder: Planting Tomatoes is scheduled for tomorrow (Mar 14, 2026)."
        );
    }

    #[test]
    fn test_same_day_reminder_message() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(
            same_day_reminder_message("Harvest Wheat", date),
            "Reminder: Harvest Wheat is scheduled for today (Mar 14, 2026)."
        );
    }

    #[test]
    fn test_is_due() {
        let now = Utc::now();
        let n = Notification {
            id: Uuid::new_v4(),
            message: "m".into(),
            is_read: false,
            crop_event_id: None,
            remind_at: now - Duration::minutes(1),
            created_at: now,
            read_at: None,
        };
        assert!(n.is_due(now));
        assert!(!n.is_due(now - Duration::minutes(2)));
    }
}
