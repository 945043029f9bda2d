//! Advisory service
//!
//! Each operation turns a farmer's form into a prompt, asks the AI gateway,
//! and shapes the reply. Replies are free-form model output, so the JSON is
//! passed through as `serde_json::Value` and only the fallbacks are typed.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use shared::store::format_inr;
use shared::validation::strip_data_url;
use shared::{
    CropAdvisorRequest, CropHealthRequest, CropSimulatorRequest, HarvestPredictorRequest,
    IdentifyPestRequest, MarketAdvisorRequest, NewPestDetection, PestResult,
    WeatherAdvisorRequest,
};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::external::weather::{CurrentConditions, TodayForecast};
use crate::external::{AiGatewayClient, ChatMessage, WeatherClient};
use crate::services::pest_history::PestHistoryService;
use crate::services::prompt::{brace_span, extract_json_object, optional_line, with_language};

const VISION_MAX_TOKENS: u32 = 2000;
const MARKET_TEMPERATURE: f32 = 0.7;

/// Advisory service
#[derive(Clone)]
pub struct AdvisorService {
    ai: AiGatewayClient,
    weather: WeatherClient,
    db: PgPool,
}

/// Crop advisor response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAdvice {
    pub advice: Value,
    pub crop_type: String,
    pub location: String,
}

/// Weather advisor response
#[derive(Debug, Clone, Serialize)]
pub struct WeatherAdvice {
    pub weather: CurrentConditions,
    pub forecast: TodayForecast,
    pub advice: Value,
    pub location: String,
}

// ============================================================================
// Prompts
// ============================================================================

/// Crop advisor prompt for a given day
pub fn crop_advisor_prompt(req: &CropAdvisorRequest, today: NaiveDate) -> String {
    let prompt = format!(
        r#"You are AgriNova's crop advisor for farmers in Southern Asia. Today is {today}.

A farmer is growing **{crop}** in **{location}**.
{stage}
{soil}

Give practical, specific advice as JSON in exactly this shape:
{{
  "dailyTip": "A tip for today that fits the date and season",
  "wateringAdvice": "Watering recommendations",
  "fertilizerAdvice": "Fertilizer type and schedule",
  "pestWatch": "Pests to watch for right now",
  "weatherConsiderations": "Weather-related advice for this time of year",
  "upcomingTasks": ["Task 1", "Task 2", "Task 3"],
  "harvestEstimate": "Estimated time to harvest if applicable",
  "marketTips": "Current market insight for this crop",
  "sustainabilityTip": "One eco-friendly farming tip"
}}

Take the monsoon pattern, local climate and regional farming practice into account."#,
        today = today.format("%A, %B %-d, %Y"),
        crop = req.crop_type.trim(),
        location = req.location.trim(),
        stage = optional_line("Growth Stage", req.growth_stage.as_deref()),
        soil = optional_line("Soil Type", req.soil_type.as_deref()),
    );
    with_language(prompt, req.language.as_deref())
}

fn crop_health_system_prompt(crop_type: Option<&str>, language: Option<&str>) -> String {
    let crop_line = match crop_type.map(str::trim) {
        Some(c) if !c.is_empty() => format!("The crop type is: {}", c),
        _ => "Identify the crop type if possible.".to_string(),
    };
    let prompt = format!(
        r#"You are an agricultural crop health analyst. Assess the crops visible in the image.

Split the visible crop area into four health categories:
1. **Healthy** - vigorous, well-nourished plants
2. **Needs Attention** - minor issues that proper care can correct
3. **At Risk** - signs of disease, nutrient deficiency or pest damage
4. **Severely Damaged** - unlikely to recover, may need removal

For each category give the estimated percentage of the area, the visual
indicators you see, and the recommended actions. Also give an overall health
score (0-100), primary concerns, immediate actions and long-term
recommendations.

{crop_line}

Respond as JSON:
{{
  "cropType": "identified or provided crop type",
  "overallHealthScore": 85,
  "categories": {{
    "healthy": {{ "percentage": 60, "indicators": ["..."], "actions": ["..."] }},
    "needsAttention": {{ "percentage": 25, "indicators": ["..."], "actions": ["..."] }},
    "atRisk": {{ "percentage": 10, "indicators": ["..."], "actions": ["..."] }},
    "severelyDamaged": {{ "percentage": 5, "indicators": ["..."], "actions": ["..."] }}
  }},
  "primaryConcerns": ["..."],
  "immediateActions": ["..."],
  "longTermRecommendations": ["..."],
  "summary": "Brief overall assessment"
}}"#
    );
    with_language(prompt, language)
}

const SIMULATOR_SYSTEM_PROMPT: &str = r#"You are an agricultural simulator with deep knowledge of farming in Southern Asia (India, Bangladesh, Pakistan, Sri Lanka, Nepal, Bhutan, Maldives).

Give realistic season simulations for the parameters provided, considering regional climate and monsoon timing, local crop prices in Indian Rupees, common regional pests and diseases, water needs for the irrigation type, and typical yields per acre.

Always respond as JSON with exactly these fields:
{
  "expectedYield": "X quintals/acre",
  "profitEstimate": "₹X,XX,XXX",
  "waterRequirement": "X,XXX liters/acre",
  "pestRisk": "Low/Medium/High",
  "bestPlantingWindow": "Month - Month",
  "recommendations": ["recommendation1", "recommendation2", "recommendation3", "recommendation4"],
  "monthlyBreakdown": [
    {"month": "Month1", "activity": "Main activity", "risk": "Low/Medium/High"},
    {"month": "Month2", "activity": "Main activity", "risk": "Low/Medium/High"},
    {"month": "Month3", "activity": "Main activity", "risk": "Low/Medium/High"},
    {"month": "Month4", "activity": "Main activity", "risk": "Low/Medium/High"}
  ]
}"#;

pub fn simulator_user_prompt(req: &CropSimulatorRequest) -> String {
    let budget = Decimal::try_from(req.budget)
        .map(format_inr)
        .unwrap_or_else(|_| format!("₹{}", req.budget));
    let prompt = format!(
        "Simulate growing {} in {} with these parameters:\n\
         - Land Size: {} acres\n\
         - Budget: {}\n\
         - Irrigation Type: {}\n\
         \n\
         Give a realistic picture of the next growing season, including typical yields, market prices and common challenges.",
        req.crop.trim(),
        req.region.trim(),
        req.land_size,
        budget,
        req.irrigation_type.trim(),
    );
    with_language(prompt, req.language.as_deref())
}

const HARVEST_SYSTEM_PROMPT: &str = r#"You are an agricultural analyst with knowledge of crop data, weather patterns and market trends for Southern Asia (India, Bangladesh, Pakistan, Sri Lanka, Nepal, Bhutan, Maldives).

Base harvest predictions on historical regional yields, current weather patterns, market price trends, common pest and disease patterns, and regional challenges.

Always respond as JSON with exactly these fields:
{
  "harvestYield": "X quintals/acre",
  "yieldTrend": "+X% or -X%",
  "marketPrice": "₹X,XXX/quintal",
  "priceTrend": "+X% expected or -X% expected",
  "weatherOutlook": "Expected weather until harvest",
  "potentialProblems": [
    {"issue": "Problem name", "probability": "X%", "severity": "Low/Medium/High"},
    {"issue": "Problem name", "probability": "X%", "severity": "Low/Medium/High"},
    {"issue": "Problem name", "probability": "X%", "severity": "Low/Medium/High"}
  ],
  "marketAnalysis": "Market conditions and the best time to sell",
  "recommendations": ["recommendation1", "recommendation2", "recommendation3", "recommendation4"],
  "confidenceScore": "X%"
}"#;

pub fn harvest_user_prompt(req: &HarvestPredictorRequest) -> String {
    let conditions = match req.field_conditions.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => format!("- Current Field Conditions: {}\n", c),
        _ => String::new(),
    };
    let prompt = format!(
        "Predict the harvest outcome for:\n\
         - Crop: {}\n\
         - Region: {}\n\
         - Planting Date: {}\n\
         {}\n\
         Cover expected yield against the regional average, market price trend and best selling window, likely problems, the weather outlook until harvest, and actionable recommendations.",
        req.crop.trim(),
        req.region.trim(),
        req.planting_date.trim(),
        conditions,
    );
    with_language(prompt, req.language.as_deref())
}

const MARKET_SYSTEM_PROMPT: &str = "You are an agricultural market analyst for South Asia.

Give realistic market analysis based on historical and seasonal price patterns, regional market infrastructure, supply and demand, weather impact on yields, government policy (MSP, subsidies) and export/import trends.

Always quote prices in Indian Rupees (INR) per quintal (100 kg).";

pub fn market_user_prompt(req: &MarketAdvisorRequest) -> String {
    let season = match req.season.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => format!(" during {} season", s),
        _ => String::new(),
    };
    let farm = match req.farm_size {
        Some(size) if size > 0.0 => format!(" for a {} hectare farm", size),
        _ => String::new(),
    };
    let prompt = format!(
        r#"Analyze the market for {crop} in {region}{season}{farm}.

Respond with JSON in exactly this structure:
{{
  "currentPrice": <number: current market price in INR per quintal>,
  "predictedPrice": <number: predicted price over the next 2-3 months>,
  "priceChange": <number: expected percentage change, may be negative>,
  "trend": "<'up', 'down' or 'stable'>",
  "confidence": <number: 1-100>,
  "bestSellingTime": "<specific recommendation, e.g. 'Mid-February to March'>",
  "marketDemand": "<'high', 'medium' or 'low'>",
  "profitabilityScore": <number: 1-10>,
  "recommendations": [<3-4 actionable recommendations>],
  "riskFactors": [<2-3 risk factors>],
  "nearbyMarkets": [
    {{"name": "<market name>", "distance": "<distance>", "price": <number>}},
    {{"name": "<market name>", "distance": "<distance>", "price": <number>}},
    {{"name": "<market name>", "distance": "<distance>", "price": <number>}}
  ],
  "seasonalInsight": "<brief note on the seasonal price pattern>"
}}

Use prices typical of Indian agricultural markets: rice around 2000-3500 INR/q, wheat 2000-2800 INR/q, cotton 6000-8000 INR/q."#,
        crop = req.crop.trim(),
        region = req.region.trim(),
    );
    with_language(prompt, req.language.as_deref())
}

fn weather_system_prompt(language: Option<&str>) -> String {
    let prompt = r#"You are AgriNova's farming advisor. From the current weather, give practical advice covering the activities suited to today, what to avoid, crop care for these conditions, irrigation, pest and disease risk from humidity and temperature, and UV protection for workers when the index is high.

Respond as JSON:
{
  "summary": "One-sentence weather summary",
  "todayAdvice": ["4-6 specific actions for today"],
  "warnings": ["things to avoid or watch for"],
  "irrigationTip": "irrigation advice",
  "pestRisk": "Low" | "Medium" | "High",
  "pestRiskReason": "why this risk level",
  "bestActivities": ["farming activities suited to this weather"],
  "workerSafety": "safety tips for farm workers"
}"#
    .to_string();
    with_language(prompt, language)
}

fn pest_system_prompt(crop_type: Option<&str>, language: Option<&str>) -> String {
    let crop_line = match crop_type.map(str::trim) {
        Some(c) if !c.is_empty() => format!("The affected crop is: {}", c),
        _ => "The crop was not specified.".to_string(),
    };
    let prompt = format!(
        r#"You are an agricultural entomologist and plant pathologist. Identify the pest or disease shown in the image and advise the farmer.

{crop_line}

Respond as JSON:
{{
  "pestName": "common name",
  "scientificName": "scientific name",
  "threatLevel": "Low" | "Medium" | "High" | "Critical",
  "description": "what the pest is and how to recognise it",
  "damageDescription": "damage it causes to this crop",
  "treatment": ["treatment steps, organic options first"],
  "prevention": ["prevention measures"],
  "confidence": "Low" | "Medium" | "High",
  "additionalNotes": "anything else the farmer should know"
}}"#
    );
    with_language(prompt, language)
}

/// Accept a data URL as-is and wrap bare base64 as a JPEG data URL
pub fn image_data_url(image: &str) -> String {
    let image = image.trim();
    if image.starts_with("data:") || image.starts_with("http") {
        image.to_string()
    } else {
        format!("data:image/jpeg;base64,{}", strip_data_url(image))
    }
}

// ============================================================================
// Fallbacks
// ============================================================================

/// Crop advice when the reply is not usable JSON
pub fn crop_advice_fallback(content: &str) -> Value {
    if brace_span(content).is_some() {
        json!({ "dailyTip": content, "error": "Could not parse structured advice" })
    } else {
        json!({ "dailyTip": content })
    }
}

/// Health assessment when the reply is not usable JSON
pub fn crop_health_fallback(crop_type: Option<&str>, content: &str) -> Value {
    let crop_type = match crop_type.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => "Unknown",
    };
    json!({
        "cropType": crop_type,
        "overallHealthScore": 70,
        "summary": content,
        "categories": {
            "healthy": {
                "percentage": 50,
                "indicators": ["Unable to parse detailed analysis"],
                "actions": ["Consult an agronomist"]
            },
            "needsAttention": { "percentage": 30, "indicators": [], "actions": [] },
            "atRisk": { "percentage": 15, "indicators": [], "actions": [] },
            "severelyDamaged": { "percentage": 5, "indicators": [], "actions": [] }
        },
        "primaryConcerns": ["Unable to perform detailed analysis"],
        "immediateActions": ["Take clearer photos", "Consult local agricultural expert"],
        "longTermRecommendations": ["Regular monitoring recommended"]
    })
}

/// Market analysis when the reply is not usable JSON
pub fn market_fallback() -> Value {
    json!({
        "currentPrice": 2500,
        "predictedPrice": 2650,
        "priceChange": 6,
        "trend": "up",
        "confidence": 75,
        "bestSellingTime": "2-3 weeks after harvest",
        "marketDemand": "medium",
        "profitabilityScore": 7,
        "recommendations": [
            "Monitor local mandi prices daily",
            "Consider storage if prices are expected to rise",
            "Check government MSP rates before selling"
        ],
        "riskFactors": [
            "Weather-related yield variations",
            "Market price volatility"
        ],
        "nearbyMarkets": [
            { "name": "Local Mandi", "distance": "10 km", "price": 2480 },
            { "name": "District Market", "distance": "25 km", "price": 2520 },
            { "name": "Regional Hub", "distance": "50 km", "price": 2550 }
        ],
        "seasonalInsight": "Prices typically stabilize after harvest season peak."
    })
}

/// Pest result when the reply is not usable JSON
pub fn pest_fallback(content: &str) -> PestResult {
    PestResult {
        pest_name: Some("Unknown".to_string()),
        scientific_name: None,
        threat_level: Some("Medium".to_string()),
        description: Some("The image could not be analysed in detail.".to_string()),
        damage_description: None,
        treatment: vec!["Consult a local agricultural extension officer".to_string()],
        prevention: vec!["Inspect crops regularly for early signs of pests".to_string()],
        confidence: Some("Low".to_string()),
        additional_notes: Some("Try a clearer, closer photo of the affected area.".to_string()),
        raw_response: Some(content.to_string()),
    }
}

fn require_content(content: String) -> AppResult<String> {
    if content.trim().is_empty() {
        return Err(AppError::AiResponse("No content in AI response".to_string()));
    }
    Ok(content)
}

fn require_json(content: &str) -> AppResult<Value> {
    extract_json_object(content)
        .ok_or_else(|| AppError::AiResponse("Could not parse JSON from response".to_string()))
}

// ============================================================================
// Service
// ============================================================================

impl AdvisorService {
    pub fn new(ai: AiGatewayClient, weather: WeatherClient, db: PgPool) -> Self {
        Self { ai, weather, db }
    }

    /// Daily advice for a crop at a location
    pub async fn crop_advice(&self, req: CropAdvisorRequest) -> AppResult<CropAdvice> {
        req.validate()?;
        tracing::info!(crop = %req.crop_type, location = %req.location, "Crop advice requested");

        let prompt = crop_advisor_prompt(&req, Utc::now().date_naive());
        let request = self.ai.chat(vec![ChatMessage::user(prompt)]);
        let content = self.ai.complete(&request).await?;

        let advice = extract_json_object(&content).unwrap_or_else(|| {
            tracing::warn!("Crop advice was not valid JSON");
            crop_advice_fallback(&content)
        });

        Ok(CropAdvice {
            advice,
            crop_type: req.crop_type,
            location: req.location,
        })
    }

    /// Health breakdown of a crop photo
    pub async fn scan_crop_health(&self, req: CropHealthRequest) -> AppResult<Value> {
        req.validate()?;
        tracing::info!(crop = ?req.crop_type, "Crop health scan requested");

        let system = crop_health_system_prompt(req.crop_type.as_deref(), req.language.as_deref());
        let request = self
            .ai
            .vision(vec![
                ChatMessage::system(system),
                ChatMessage::user_with_image(
                    "Analyze this crop image for health assessment.",
                    image_data_url(&req.image_base64),
                ),
            ])
            .with_max_tokens(VISION_MAX_TOKENS);
        let content = require_content(self.ai.complete(&request).await?)?;

        Ok(extract_json_object(&content).unwrap_or_else(|| {
            tracing::warn!("Crop health reply was not valid JSON");
            crop_health_fallback(req.crop_type.as_deref(), &content)
        }))
    }

    /// Season simulation for a planned crop
    pub async fn simulate_crop(&self, req: CropSimulatorRequest) -> AppResult<Value> {
        req.validate()?;
        tracing::info!(crop = %req.crop, region = %req.region, land_size = req.land_size, "Simulation requested");

        let request = self.ai.chat(vec![
            ChatMessage::system(SIMULATOR_SYSTEM_PROMPT),
            ChatMessage::user(simulator_user_prompt(&req)),
        ]);
        let content = require_content(self.ai.complete(&request).await?)?;
        require_json(&content)
    }

    /// Harvest prediction for a planted crop
    pub async fn predict_harvest(&self, req: HarvestPredictorRequest) -> AppResult<Value> {
        req.validate()?;
        tracing::info!(crop = %req.crop, region = %req.region, "Harvest prediction requested");

        let request = self.ai.chat(vec![
            ChatMessage::system(HARVEST_SYSTEM_PROMPT),
            ChatMessage::user(harvest_user_prompt(&req)),
        ]);
        let content = require_content(self.ai.complete(&request).await?)?;
        require_json(&content)
    }

    /// Market price analysis
    pub async fn analyze_market(&self, req: MarketAdvisorRequest) -> AppResult<Value> {
        req.validate()?;
        tracing::info!(crop = %req.crop, region = %req.region, "Market analysis requested");

        let request = self
            .ai
            .chat(vec![
                ChatMessage::system(MARKET_SYSTEM_PROMPT),
                ChatMessage::user(market_user_prompt(&req)),
            ])
            .with_temperature(MARKET_TEMPERATURE);
        let content = self.ai.complete(&request).await?;

        Ok(extract_json_object(&content).unwrap_or_else(|| {
            tracing::warn!("Market reply was not valid JSON, using fallback analysis");
            market_fallback()
        }))
    }

    /// Advice for today's weather at a location
    pub async fn weather_advice(&self, req: WeatherAdvisorRequest) -> AppResult<WeatherAdvice> {
        req.validate()?;
        let location = req.location_label();
        tracing::info!(location = %location, "Fetching weather");

        let snapshot = self
            .weather
            .get_conditions(req.latitude, req.longitude)
            .await?;

        let farm = match req.location.as_deref().map(str::trim) {
            Some(l) if !l.is_empty() => l,
            _ => "the farm",
        };
        let user_prompt = format!(
            "{}\n\nWhat farming activities and precautions would you recommend for today?",
            snapshot.prompt_block(farm)
        );
        let request = self.ai.chat(vec![
            ChatMessage::system(weather_system_prompt(req.language.as_deref())),
            ChatMessage::user(user_prompt),
        ]);
        let content = self.ai.complete(&request).await?;

        let advice = extract_json_object(&content)
            .unwrap_or_else(|| json!({ "rawAdvice": content }));

        tracing::info!("Weather advice generated");
        Ok(WeatherAdvice {
            weather: snapshot.current,
            forecast: snapshot.today,
            advice,
            location,
        })
    }

    /// Identify a pest from a photo and record it in the pest history
    pub async fn identify_pest(&self, req: IdentifyPestRequest) -> AppResult<PestResult> {
        req.validate()?;
        tracing::info!(crop = ?req.crop_type, "Pest identification requested");

        let system = pest_system_prompt(req.crop_type.as_deref(), req.language.as_deref());
        let request = self
            .ai
            .vision(vec![
                ChatMessage::system(system),
                ChatMessage::user_with_image(
                    "Identify the pest or disease in this image.",
                    image_data_url(&req.image_base64),
                ),
            ])
            .with_max_tokens(VISION_MAX_TOKENS);
        let content = require_content(self.ai.complete(&request).await?)?;

        let parsed = extract_json_object(&content)
            .and_then(|v| serde_json::from_value::<PestResult>(v).ok());

        let result = match parsed {
            Some(result) => result,
            None => {
                tracing::warn!("Pest reply was not valid JSON");
                return Ok(pest_fallback(&content));
            }
        };

        let row = NewPestDetection::from_result(req.crop_type.as_deref(), &result);
        if let Err(e) = PestHistoryService::new(self.db.clone()).record(&row).await {
            tracing::warn!("Failed to save pest detection: {}", e);
        }

        Ok(result)
    }
}
