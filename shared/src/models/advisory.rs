//! Request payloads for the AI advisory endpoints
//!
//! Field names follow the camelCase JSON bodies sent by the web forms.

use serde::{Deserialize, Serialize};

use crate::validation::{
    require, validate_coordinates, validate_image, validate_positive, FieldError,
};

/// Daily crop advice
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAdvisorRequest {
    #[serde(default)]
    pub crop_type: String,
    #[serde(default)]
    pub location: String,
    pub growth_stage: Option<String>,
    pub soil_type: Option<String>,
    pub language: Option<String>,
}

impl CropAdvisorRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        require("cropType", &self.crop_type, "Please enter crop type and location")?;
        require("location", &self.location, "Please enter crop type and location")
    }
}

/// Photo-based crop health assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropHealthRequest {
    #[serde(default)]
    pub image_base64: String,
    pub crop_type: Option<String>,
    pub language: Option<String>,
}

impl CropHealthRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_image("imageBase64", &self.image_base64).map(|_| ())
    }
}

/// Season simulation for a planned crop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSimulatorRequest {
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub land_size: f64,
    #[serde(default = "default_budget")]
    pub budget: f64,
    #[serde(default)]
    pub irrigation_type: String,
    pub language: Option<String>,
}

fn default_budget() -> f64 {
    50_000.0
}

impl CropSimulatorRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        require("crop", &self.crop, "Please fill in all fields")?;
        require("region", &self.region, "Please fill in all fields")?;
        validate_positive("landSize", self.land_size, "Please fill in all fields")?;
        require("irrigationType", &self.irrigation_type, "Please fill in all fields")?;
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(FieldError::new("budget", "Budget cannot be negative"));
        }
        Ok(())
    }
}

/// Harvest outcome prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestPredictorRequest {
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub planting_date: String,
    pub field_conditions: Option<String>,
    pub language: Option<String>,
}

impl HarvestPredictorRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        require("crop", &self.crop, "Please fill in all required fields")?;
        require("region", &self.region, "Please fill in all required fields")?;
        require("plantingDate", &self.planting_date, "Please fill in all required fields")
    }
}

/// Market price analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAdvisorRequest {
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub region: String,
    pub season: Option<String>,
    pub farm_size: Option<f64>,
    pub language: Option<String>,
}

impl MarketAdvisorRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        require("crop", &self.crop, "Please select a crop and region")?;
        require("region", &self.region, "Please select a crop and region")?;
        if let Some(size) = self.farm_size {
            validate_positive("farmSize", size, "Farm size must be greater than zero")?;
        }
        Ok(())
    }
}

/// Weather-driven farming advice for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAdvisorRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub location: Option<String>,
    pub language: Option<String>,
}

impl WeatherAdvisorRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_coordinates(self.latitude, self.longitude)
    }

    /// Label used in prompts and responses
    pub fn location_label(&self) -> String {
        match self.location.as_deref().map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => format!("{}, {}", self.latitude, self.longitude),
        }
    }
}

/// Photo-based pest identification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyPestRequest {
    #[serde(default)]
    pub image_base64: String,
    pub crop_type: Option<String>,
    pub language: Option<String>,
}

impl IdentifyPestRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_image("imageBase64", &self.image_base64).map(|_| ())
    }
}
