//! AI Gateway Client
//!
//! Client for the hosted chat-completions gateway that answers every
//! advisory prompt. The gateway speaks the OpenAI wire format.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::AiGatewayConfig;
use crate::error::{AppError, AppResult};

/// Client for the AI chat-completions gateway
#[derive(Clone)]
pub struct AiGatewayClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    vision_model: String,
}

/// Message content: plain text or multimodal parts
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

/// One chat message
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Text(text.into()),
        }
    }

    /// User message carrying a question and an image (data URL or https URL)
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                    },
                },
            ]),
        }
    }
}

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl AiGatewayClient {
    /// Create a client from the gateway configuration
    pub fn new(config: &AiGatewayConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.key().map(str::to_string),
            model: config.model.clone(),
            vision_model: config.vision_model.clone(),
        }
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(api_key: Option<&str>, base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            model: "google/gemini-3-flash-preview".to_string(),
            vision_model: "google/gemini-2.5-flash".to_string(),
        }
    }

    /// Request using the text model
    pub fn chat(&self, messages: Vec<ChatMessage>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Request using the vision model
    pub fn vision(&self, messages: Vec<ChatMessage>) -> ChatRequest {
        ChatRequest {
            model: self.vision_model.clone(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Send a chat request and return the first choice's text
    ///
    /// A reply with no choices or no content yields an empty string.
    pub async fn complete(&self, request: &ChatRequest) -> AppResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration("AI gateway API key is not configured".to_string())
        })?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::debug!(model = %request.model, "Sending AI gateway request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::AiGateway(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(status = %status, body = %body, "AI gateway error");

            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => AppError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => AppError::PaymentRequired,
                _ => AppError::AiGateway(format!("Gateway returned {}", status)),
            });
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiGateway(format!("Failed to parse response: {}", e)))?;

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        tracing::debug!(content = %content, "AI gateway response");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    #[test]
    fn test_multimodal_message_shape() {
        let msg = ChatMessage::user_with_image("Analyze", "data:image/png;base64,AAAA");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(json["content"][1]["image_url"]["url"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let client = AiGatewayClient::with_base_url(Some("k"), "http://localhost");
        let json = serde_json::to_value(client.chat(vec![ChatMessage::user("hi")])).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[tokio::test]
    async fn test_complete_returns_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test_key"))
            .and(body_partial_json(serde_json::json!({ "model": "google/gemini-2.5-flash" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("{\"ok\":true}")))
            .mount(&mock_server)
            .await;

        let client = AiGatewayClient::with_base_url(Some("test_key"), &mock_server.uri());
        let request = client
            .vision(vec![ChatMessage::user("hello")])
            .with_max_tokens(2000);
        let content = client.complete(&request).await.unwrap();

        assert_eq!(content, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_missing_choices_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = AiGatewayClient::with_base_url(Some("k"), &mock_server.uri());
        let content = client
            .complete(&client.chat(vec![ChatMessage::user("hi")]))
            .await
            .unwrap();
        assert_eq!(content, "");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        for (code, expected) in [
            (429u16, "RATE_LIMITED"),
            (402, "PAYMENT_REQUIRED"),
            (500, "AI_GATEWAY_ERROR"),
        ] {
            let mock_server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(code).set_body_string("upstream detail"))
                .mount(&mock_server)
                .await;

            let client = AiGatewayClient::with_base_url(Some("k"), &mock_server.uri());
            let err = client
                .complete(&client.chat(vec![ChatMessage::user("hi")]))
                .await
                .unwrap_err();
            assert_eq!(err.detail().1.code, expected, "status {}", code);
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let client = AiGatewayClient::with_base_url(None, "http://127.0.0.1:9");
        let err = client
            .complete(&client.chat(vec![ChatMessage::user("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
