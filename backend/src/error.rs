//! Error handling for the AgriNova advisory platform
//!
//! Every failure is answered with `{"error": {"code", "message", "field"?}}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FieldError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    // AI gateway errors
    #[error("AI gateway rate limit exceeded")]
    RateLimited,

    #[error("AI gateway requires payment")]
    PaymentRequired,

    #[error("AI gateway error: {0}")]
    AiGateway(String),

    /// The AI answered but the answer could not be used
    #[error("{0}")]
    AiResponse(String),

    // Other external services
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::Validation {
            field: e.field,
            message: e.message,
        }
    }
}

// ============================================================================
// Extractor rejections
// ============================================================================

/// Name of the offending field in a serde message such as
/// "missing field `latitude` at line 1 column 18" or "date: input contains invalid characters"
fn rejected_field(detail: &str) -> Option<String> {
    if let Some((_, rest)) = detail.split_once("missing field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }

    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty() && !path.contains(char::is_whitespace);
    is_path.then(|| path.to_string())
}

/// Validation error from an axum rejection message ("<context>: <serde detail>")
fn rejection_to_validation(body_text: String, fallback_field: &str) -> AppError {
    let field = body_text
        .split_once(": ")
        .and_then(|(_, detail)| rejected_field(detail))
        .unwrap_or_else(|| fallback_field.to_string());

    AppError::Validation {
        field,
        message: body_text,
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        rejection_to_validation(rejection.body_text(), "body")
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        rejection_to_validation(rejection.body_text(), "query")
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation {
            field: "id".to_string(),
            message: rejection.body_text(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl AppError {
    /// HTTP status and body for this error
    pub fn detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorDetail::new("PAYLOAD_TOO_LARGE", "Request body is too large"),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorDetail::new(
                    "RATE_LIMITED",
                    "Rate limit exceeded. Please try again later.",
                ),
            ),
            AppError::PaymentRequired => (
                StatusCode::PAYMENT_REQUIRED,
                ErrorDetail::new(
                    "PAYMENT_REQUIRED",
                    "Service temporarily unavailable. Please try again later.",
                ),
            ),
            AppError::AiGateway(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("AI_GATEWAY_ERROR", "Failed to get AI response"),
            ),
            AppError::AiResponse(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("AI_RESPONSE_ERROR", msg.clone()),
            ),
            AppError::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail::new(
                    "EXTERNAL_SERVICE_ERROR",
                    format!("External service error: {}", msg),
                ),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("CONFIGURATION_ERROR", msg.clone()),
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATABASE_ERROR", "A database error occurred"),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", "An internal server error occurred"),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.detail();

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
