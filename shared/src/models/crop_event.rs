//! Crop care event models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_not_blank, FieldError};

/// Kind of crop care action scheduled on the planner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Planting,
    Watering,
    Harvest,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Planting, EventType::Watering, EventType::Harvest];

    /// Display label used in titles and messages
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Planting => "Planting",
            EventType::Watering => "Watering",
            EventType::Harvest => "Harvest",
        }
    }

    /// Storage code (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Planting => "planting",
            EventType::Watering => "watering",
            EventType::Harvest => "harvest",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planting" => Ok(EventType::Planting),
            "watering" => Ok(EventType::Watering),
            "harvest" => Ok(EventType::Harvest),
            other => Err(format!("Unknown event type: {}", other)),
        }
    }
}

/// A scheduled planting, watering or harvest action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropEvent {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub crop_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub reminder: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Planner form input for creating or updating an event.
///
/// The title is never supplied by the client; see [`event_title`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CropEventInput {
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "Crop name must be less than 100 characters")
    )]
    pub crop_name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: NaiveDate,
    #[validate(length(max = 500, message = "Notes must be less than 500 characters"))]
    pub notes: Option<String>,
    #[serde(default = "default_reminder")]
    pub reminder: bool,
}

fn default_reminder() -> bool {
    true
}

impl CropEventInput {
    /// Run the form rules, reporting the first offending field
    pub fn check(&self) -> Result<(), FieldError> {
        self.validate().map_err(FieldError::from)
    }

    /// Trim the crop name and drop empty notes
    pub fn normalized(mut self) -> Self {
        self.crop_name = self.crop_name.trim().to_string();
        self.notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }
}

/// Derived event title, e.g. "Planting Tomatoes"
pub fn event_title(event_type: EventType, crop_name: &str) -> String {
    format!("{} {}", event_type.label(), crop_name.trim())
}

/// Confirmation shown after an event is created
pub fn scheduled_message(input: &CropEventInput) -> String {
    format!(
        "{} {} scheduled{}.",
        input.crop_name,
        input.event_type.label().to_lowercase(),
        if input.reminder { " with reminder" } else { "" }
    )
}

/// Confirmation shown after an event is updated
pub fn updated_message(input: &CropEventInput) -> String {
    format!(
        "{} {} has been updated.",
        input.crop_name,
        input.event_type.label().to_lowercase()
    )
}
