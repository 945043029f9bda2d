//! WebAssembly module for the AgriNova advisory platform
//!
//! Provides client-side computation for:
//! - Planner month grids and event placement
//! - Upcoming events and reminder times
//! - Form validation before submission
//! - Cart totals and rupee formatting

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::calendar;
pub use shared::models::*;
pub use shared::store;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js_error)
}

fn parse_date(value: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| to_js_error(format!("Invalid date {}: {}", value, e)))
}

fn parse_events(events_json: &str) -> Result<Vec<CropEvent>, JsValue> {
    serde_json::from_str(events_json)
        .map_err(|e| to_js_error(format!("Invalid events JSON: {}", e)))
}

/// Today's date in the browser's local time zone
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn today_local() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

/// Month view for the planner as JSON (cells with their events)
#[wasm_bindgen]
pub fn build_calendar_month(
    year: i32,
    month: u32,
    events_json: &str,
    today: &str,
) -> Result<String, JsValue> {
    let events = parse_events(events_json)?;
    let today = parse_date(today)?;
    let view = calendar::build_month(year, month, &events, today)
        .ok_or_else(|| to_js_error(format!("Invalid month: {}-{}", year, month)))?;
    to_json(&view)
}

/// Events for one grid cell as JSON
#[wasm_bindgen]
pub fn events_for_day(events_json: &str, day: &str) -> Result<String, JsValue> {
    let events = parse_events(events_json)?;
    let day = parse_date(day)?;
    let matching: Vec<&CropEvent> = calendar::events_for_day(&events, day);
    to_json(&matching)
}

/// Events in the coming week, soonest first, as JSON
///
/// `now` is a local date-time such as `2026-03-10T08:30:00`.
#[wasm_bindgen]
pub fn upcoming_events(events_json: &str, now: &str) -> Result<String, JsValue> {
    let events = parse_events(events_json)?;
    let now = NaiveDateTime::parse_from_str(now.trim(), "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| to_js_error(format!("Invalid date-time {}: {}", now, e)))?;
    let upcoming = calendar::upcoming(&events, now, calendar::DEFAULT_UPCOMING_LIMIT);
    to_json(&upcoming)
}

/// Local reminder time for an event date (`YYYY-MM-DDTHH:MM:SS`)
#[wasm_bindgen]
pub fn reminder_time(event_date: &str) -> Result<String, JsValue> {
    let date = parse_date(event_date)?;
    Ok(calendar::reminder_time(date)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string())
}

/// Derived title for a planner event
#[wasm_bindgen]
pub fn crop_event_title(event_type: &str, crop_name: &str) -> Result<String, JsValue> {
    let event_type: EventType = event_type.parse().map_err(to_js_error)?;
    Ok(event_title(event_type, crop_name))
}

#[derive(Serialize)]
struct FormCheck {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<Result<(), FieldError>> for FormCheck {
    fn from(result: Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => FormCheck {
                valid: true,
                field: None,
                message: None,
            },
            Err(e) => FormCheck {
                valid: false,
                field: Some(e.field),
                message: Some(e.message),
            },
        }
    }
}

/// Validate a form before submission
///
/// `form` is one of `crop-event`, `crop-advisor`, `crop-health-scanner`,
/// `crop-simulator`, `harvest-predictor`, `market-advisor`,
/// `weather-advisor` or `identify-pest`. Returns `{valid, field?, message?}`.
#[wasm_bindgen]
pub fn validate_form(form: &str, body_json: &str) -> Result<String, JsValue> {
    fn check<T, F>(body_json: &str, f: F) -> Result<Result<(), FieldError>, JsValue>
    where
        T: serde::de::DeserializeOwned,
        F: FnOnce(&T) -> Result<(), FieldError>,
    {
        let value: T = serde_json::from_str(body_json)
            .map_err(|e| to_js_error(format!("Invalid form JSON: {}", e)))?;
        Ok(f(&value))
    }

    let result = match form {
        "crop-event" => check::<CropEventInput, _>(body_json, |i| i.check())?,
        "crop-advisor" => check::<CropAdvisorRequest, _>(body_json, |r| r.validate())?,
        "crop-health-scanner" => check::<CropHealthRequest, _>(body_json, |r| r.validate())?,
        "crop-simulator" => check::<CropSimulatorRequest, _>(body_json, |r| r.validate())?,
        "harvest-predictor" => check::<HarvestPredictorRequest, _>(body_json, |r| r.validate())?,
        "market-advisor" => check::<MarketAdvisorRequest, _>(body_json, |r| r.validate())?,
        "weather-advisor" => check::<WeatherAdvisorRequest, _>(body_json, |r| r.validate())?,
        "identify-pest" => check::<IdentifyPestRequest, _>(body_json, |r| r.validate())?,
        other => return Err(to_js_error(format!("Unknown form: {}", other))),
    };

    log_rejection(&result);
    to_json(&FormCheck::from(result))
}

#[cfg(target_arch = "wasm32")]
fn log_rejection(result: &Result<(), FieldError>) {
    if let Err(e) = result {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn log_rejection(_result: &Result<(), FieldError>) {}

/// Price a cart as JSON given the product list and cart items as JSON
#[wasm_bindgen]
pub fn quote_cart(products_json: &str, items_json: &str) -> Result<String, JsValue> {
    let products: Vec<HardwareProduct> = serde_json::from_str(products_json)
        .map_err(|e| to_js_error(format!("Invalid products JSON: {}", e)))?;
    let items: Vec<CartItem> = serde_json::from_str(items_json)
        .map_err(|e| to_js_error(format!("Invalid cart JSON: {}", e)))?;
    let quote = store::quote(&products, &items).map_err(to_js_error)?;
    to_json(&quote)
}

/// Crop, region, season, irrigation and soil options for the form dropdowns
#[wasm_bindgen]
pub fn form_options() -> Result<String, JsValue> {
    to_json(&CATALOG)
}

/// Format an amount in rupees with Indian digit grouping
#[wasm_bindgen]
pub fn format_rupees(amount: f64) -> String {
    let amount = Decimal::try_from(amount).unwrap_or(Decimal::ZERO);
    store::format_inr(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events_json() -> String {
        serde_json::json!([
            {
                "id": "6f1c2d7e-7a53-4c1b-9b1e-2f0f3c1a9d10",
                "title": "Planting Tomatoes",
                "date": "2026-03-12",
                "type": "planting",
                "cropName": "Tomatoes",
                "reminder": true,
                "createdAt": "2026-03-01T00:00:00Z",
                "updatedAt": "2026-03-01T00:00:00Z"
            }
        ])
        .to_string()
    }

    #[test]
    fn test_build_calendar_month() {
        let json = build_calendar_month(2026, 3, &events_json(), "2026-03-10").unwrap();
        let view: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["cells"].as_array().unwrap().len(), 35);
        assert_eq!(view["title"], "March 2026");
    }

    #[test]
    fn test_events_for_day() {
        let hit = events_for_day(&events_json(), "2026-03-12").unwrap();
        let miss = events_for_day(&events_json(), "2026-03-13").unwrap();
        assert!(hit.contains("Tomatoes"));
        assert_eq!(miss, "[]");
    }

    #[test]
    fn test_reminder_time() {
        assert_eq!(reminder_time("2026-03-12").unwrap(), "2026-03-11T09:00:00");
    }

    #[test]
    fn test_validate_form() {
        let ok = validate_form("crop-advisor", r#"{"cropType":"Rice","location":"Kerala - Kochi"}"#).unwrap();
        assert_eq!(ok, r#"{"valid":true}"#);

        let bad = validate_form("market-advisor", r#"{"crop":"Rice"}"#).unwrap();
        assert!(bad.contains(r#""field":"region""#));

        let event = validate_form(
            "crop-event",
            r#"{"cropName":"  ","type":"harvest","date":"2026-03-12"}"#,
        )
        .unwrap();
        assert!(event.contains("Crop name is required"));
        assert!(event.contains(r#""field":"cropName""#));
    }

    #[test]
    fn test_form_options() {
        let options: serde_json::Value = serde_json::from_str(&form_options().unwrap()).unwrap();
        assert_eq!(options["crops"][0], "Rice (Paddy)");
        assert_eq!(options["seasons"][1]["value"], "rabi");
        assert_eq!(options["irrigationTypes"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(123456.0), "₹1,23,456");
    }

    #[test]
    fn test_crop_event_title() {
        assert_eq!(crop_event_title("watering", "Corn").unwrap(), "Watering Corn");
    }
}
