//! Planner calendar logic
//!
//! Month grids start on Sunday and end on Saturday, so a grid always holds
//! whole weeks (28, 35 or 42 cells). Events are matched to cells by exact date
//! equality. All date-times here are local (naive) to the farmer.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::CropEvent;

/// Column headers for the month grid
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Upcoming events shown in the side panel
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// How far ahead "upcoming" looks
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Reminders fire at this local hour on the day before the event
pub const REMINDER_HOUR: u32 = 9;

/// One day cell of the month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub events: Vec<CropEvent>,
}

/// A month of cells ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weekdays: Vec<String>,
    pub cells: Vec<CalendarCell>,
}

/// First day of the given month, `None` for an invalid month
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of the given month
pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = next_month(year, month);
    first_of_month(next_year, next_month)?.pred_opt()
}

/// Year and month after the given one
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Year and month before the given one
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Every day from the Sunday on or before the 1st to the Saturday on or after the last day
pub fn month_grid(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = first_of_month(year, month)?;
    let last = last_of_month(year, month)?;

    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64);

    Some(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Events dated exactly on `day`
pub fn events_for_day<'a>(events: &'a [CropEvent], day: NaiveDate) -> Vec<&'a CropEvent> {
    events.iter().filter(|e| e.date == day).collect()
}

/// Build the month view with events placed in their cells
pub fn build_month(
    year: i32,
    month: u32,
    events: &[CropEvent],
    today: NaiveDate,
) -> Option<CalendarMonth> {
    let days = month_grid(year, month)?;
    let first = first_of_month(year, month)?;

    let cells = days
        .into_iter()
        .map(|date| CalendarCell {
            date,
            in_month: date.month() == month && date.year() == year,
            is_today: date == today,
            events: events_for_day(events, date).into_iter().cloned().collect(),
        })
        .collect();

    Some(CalendarMonth {
        year,
        month,
        title: first.format("%B %Y").to_string(),
        weekdays: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
        cells,
    })
}

/// Local midnight at the start of an event's day
fn event_start(event: &CropEvent) -> NaiveDateTime {
    event.date.and_time(NaiveTime::MIN)
}

/// Events strictly after `now` and strictly before one week from `now`,
/// soonest first, at most `limit`
pub fn upcoming(events: &[CropEvent], now: NaiveDateTime, limit: usize) -> Vec<CropEvent> {
    let window_end = now + Duration::days(UPCOMING_WINDOW_DAYS);

    let mut selected: Vec<CropEvent> = events
        .iter()
        .filter(|e| {
            let start = event_start(e);
            start > now && start < window_end
        })
        .cloned()
        .collect();

    selected.sort_by_key(|e| e.date);
    selected.truncate(limit);
    selected
}

/// When the reminder for an event dated `date` fires: the day before at 09:00 local
pub fn reminder_time(date: NaiveDate) -> NaiveDateTime {
    let day_before = date.pred_opt().unwrap_or(date);
    day_before.and_time(NaiveTime::from_hms_opt(REMINDER_HOUR, 0, 0).unwrap_or(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use chrono::{Utc, Weekday};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_on(day: NaiveDate, crop: &str) -> CropEvent {
        CropEvent {
            id: Uuid::new_v4(),
            title: format!("Planting {}", crop),
            date: day,
            event_type: EventType::Planting,
            crop_name: crop.to_string(),
            notes: None,
            reminder: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_grid_bounds() {
        // March 2026 starts on a Sunday and ends on a Tuesday
        let grid = month_grid(2026, 3).unwrap();
        assert_eq!(grid.first(), Some(&date(2026, 3, 1)));
        assert_eq!(grid.last(), Some(&date(2026, 4, 4)));
        assert_eq!(grid.len(), 35);

        // February 2026 starts on a Sunday and ends on a Saturday
        assert_eq!(month_grid(2026, 2).unwrap().len(), 28);

        // August 2026 needs six rows
        assert_eq!(month_grid(2026, 8).unwrap().len(), 42);
    }

    #[test]
    fn test_invalid_month() {
        assert!(month_grid(2026, 0).is_none());
        assert!(month_grid(2026, 13).is_none());
    }

    #[test]
    fn test_navigation() {
        assert_eq!(next_month(2026, 12), (2027, 1));
        assert_eq!(next_month(2026, 5), (2026, 6));
        assert_eq!(previous_month(2026, 1), (2025, 12));
        assert_eq!(previous_month(2026, 5), (2026, 4));
        assert_eq!(last_of_month(2024, 2), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_build_month_flags() {
        let events = vec![event_on(date(2026, 3, 14), "Tomatoes")];
        let view = build_month(2026, 3, &events, date(2026, 3, 10)).unwrap();

        assert_eq!(view.title, "March 2026");
        assert_eq!(view.weekdays[0], "Sun");

        let today: Vec<_> = view.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2026, 3, 10));

        let with_events: Vec<_> = view.cells.iter().filter(|c| !c.events.is_empty()).collect();
        assert_eq!(with_events.len(), 1);
        assert_eq!(with_events[0].date, date(2026, 3, 14));

        let trailing = view.cells.last().unwrap();
        assert!(!trailing.in_month);
    }

    #[test]
    fn test_upcoming_window() {
        let now = date(2026, 3, 10).and_hms_opt(8, 30, 0).unwrap();
        let events = vec![
            event_on(date(2026, 3, 10), "Today"),
            event_on(date(2026, 3, 15), "Later"),
            event_on(date(2026, 3, 12), "Soon"),
            event_on(date(2026, 3, 17), "Edge"),
            event_on(date(2026, 3, 18), "TooFar"),
            event_on(date(2026, 3, 1), "Past"),
        ];

        let names: Vec<_> = upcoming(&events, now, DEFAULT_UPCOMING_LIMIT)
            .into_iter()
            .map(|e| e.crop_name)
            .collect();
        assert_eq!(names, vec!["Soon", "Later", "Edge"]);
    }

    #[test]
    fn test_upcoming_limit() {
        let now = date(2026, 3, 10).and_hms_opt(0, 0, 1).unwrap();
        let events: Vec<_> = (11..=16).map(|d| event_on(date(2026, 3, d), "Rice")).collect();
        assert_eq!(upcoming(&events, now, 5).len(), 5);
        assert_eq!(upcoming(&events, now, 2)[1].date, date(2026, 3, 12));
    }

    #[test]
    fn test_reminder_time() {
        assert_eq!(
            reminder_time(date(2026, 3, 1)),
            date(2026, 2, 28).and_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            reminder_time(date(2027, 1, 1)),
            date(2026, 12, 31).and_hms_opt(9, 0, 0).unwrap()
        );
    }

    proptest! {
        /// Grids are whole weeks running Sunday to Saturday and cover the month
        #[test]
        fn prop_grid_is_whole_weeks(year in 1990i32..2100, month in 1u32..=12) {
            let grid = month_grid(year, month).unwrap();
            prop_assert_eq!(grid.len() % 7, 0);
            prop_assert!(grid.len() == 28 || grid.len() == 35 || grid.len() == 42);
            prop_assert_eq!(grid[0].weekday(), Weekday::Sun);
            prop_assert_eq!(grid[grid.len() - 1].weekday(), Weekday::Sat);
            prop_assert!(grid.contains(&first_of_month(year, month).unwrap()));
            prop_assert!(grid.contains(&last_of_month(year, month).unwrap()));
        }

        /// An event appears in the cell for its exact date and in no other cell
        #[test]
        fn prop_event_in_exactly_one_cell(year in 1990i32..2100, month in 1u32..=12, day in 1u32..=28) {
            let event_date = date(year, month, day);
            let events = vec![event_on(event_date, "Wheat")];
            let view = build_month(year, month, &events, event_date).unwrap();

            let matching: Vec<_> = view.cells.iter().filter(|c| !c.events.is_empty()).collect();
            prop_assert_eq!(matching.len(), 1);
            prop_assert_eq!(matching[0].date, event_date);
            prop_assert_eq!(matching[0].events[0].id, events[0].id);
        }

        /// Reminders always fire 15 hours before the event day starts
        #[test]
        fn prop_reminder_is_day_before_9am(days in 0i64..40000) {
            let event_date = date(1990, 1, 2) + Duration::days(days);
            let fire = reminder_time(event_date);
            prop_assert_eq!(event_date.and_time(NaiveTime::MIN) - fire, Duration::hours(15));
        }
    }
}
