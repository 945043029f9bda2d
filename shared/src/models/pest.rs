//! Pest identification models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pest identification result as returned by the AI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PestResult {
    #[serde(default)]
    pub pest_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub threat_level: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub damage_description: Option<String>,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Row saved to the pest history after a successful identification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PestDetection {
    pub id: Uuid,
    pub crop_type: String,
    pub pest_name: String,
    pub threat_level: String,
    pub description: String,
    pub damage: String,
    pub treatment: String,
    pub prevention: String,
    pub created_at: DateTime<Utc>,
}

/// Values to insert into the pest history
#[derive(Debug, Clone, PartialEq)]
pub struct NewPestDetection {
    pub crop_type: String,
    pub pest_name: String,
    pub threat_level: String,
    pub description: String,
    pub damage: String,
    pub treatment: String,
    pub prevention: String,
}

fn or_unknown(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "Unknown".to_string(),
    }
}

impl NewPestDetection {
    /// Flatten an identification result into a history row
    pub fn from_result(crop_type: Option<&str>, result: &PestResult) -> Self {
        Self {
            crop_type: or_unknown(crop_type),
            pest_name: or_unknown(result.pest_name.as_deref()),
            threat_level: or_unknown(result.threat_level.as_deref()),
            description: result.description.clone().unwrap_or_default(),
            damage: result.damage_description.clone().unwrap_or_default(),
            treatment: result.treatment.join("; "),
            prevention: result.prevention.join("; "),
        }
    }
}
