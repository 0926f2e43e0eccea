use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";
const PERSONA_PROMPT: &str = "You are HealthAI, a helpful and responsible AI assistant.";
const PERSONA_ACK: &str = "Understood. I am HealthAI. How can I help?";

pub const TRANSPORT_FALLBACK: &str = "Error: Could not connect to the AI service.";
pub const MALFORMED_FALLBACK: &str = "I'm sorry, I couldn't generate a response at the moment.";
pub const UNEXPECTED_FALLBACK: &str = "An unexpected error occurred while generating the response.";

/// Result of one generation call. Failures are values, never errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Success(String),
    /// Timeout, connection failure or non-2xx status
    TransportFailure,
    /// Valid JSON without the expected candidate text
    MalformedResponse,
    UnexpectedFailure,
}

impl GenerationOutcome {
    /// Text shown to the user for this outcome
    pub fn into_reply(self) -> String {
        match self {
            GenerationOutcome::Success(text) => text,
            GenerationOutcome::TransportFailure => TRANSPORT_FALLBACK.to_string(),
            GenerationOutcome::MalformedResponse => MALFORMED_FALLBACK.to_string(),
            GenerationOutcome::UnexpectedFailure => UNEXPECTED_FALLBACK.to_string(),
        }
    }
}

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(&self, user_message: &str) -> GenerationOutcome;
}

// Request payload
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

// Response payload (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

fn turn(role: &str, text: &str) -> Content {
    Content {
        role: Some(role.to_string()),
        parts: Some(vec![Part { text: Some(text.to_string()) }]),
    }
}

/// Two priming turns followed by the user's message
pub fn build_payload(user_message: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![
            turn("user", PERSONA_PROMPT),
            turn("model", PERSONA_ACK),
            turn("user", user_message),
        ],
    }
}

fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()?
        .text
}

/// Gateway to the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiService {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        if config.api_key.is_empty() {
            log::warn!("⚠️  GEMINI_API_KEY is not set; chat replies will fail");
        }

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ReplyGenerator for GeminiService {
    async fn generate_reply(&self, user_message: &str) -> GenerationOutcome {
        log::info!("🤖 Requesting reply from {}", self.config.model);

        let response = match self
            .client
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .json(&build_payload(user_message))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ Could not reach the AI service: {}", e.without_url());
                return GenerationOutcome::TransportFailure;
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ AI service returned status {}", status);
            return GenerationOutcome::TransportFailure;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::error!("❌ Failed to read AI response body: {}", e.without_url());
                return GenerationOutcome::TransportFailure;
            }
        };

        let parsed: GenerateContentResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::error!("❌ Unexpected AI response: {}", e);
                return GenerationOutcome::UnexpectedFailure;
            }
        };

        match extract_text(parsed) {
            Some(text) => {
                log::info!("✅ AI reply received ({} chars)", text.len());
                GenerationOutcome::Success(text)
            }
            None => {
                log::warn!("⚠️  AI response had no candidate text");
                GenerationOutcome::MalformedResponse
            }
        }
    }
}
