use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::errors::ProviderError;
use crate::plan::PlanProvider;
use crate::sanitize::preview;

const DEFAULT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(client: Client) -> Self {
        let base_url = std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_BASE.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self { client, base_url, model }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl PlanProvider for GeminiClient {
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = self.endpoint();
        info!("🔗 Making request to: {}", url);

        let payload = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        info!("📥 Response status: {}", status);
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("❌ Gemini API error response: {}", preview(&response_text, 500));
            return Err(ProviderError::Status { status: status.as_u16(), body: response_text });
        }

        let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
            ProviderError::Response(format!("parse error: {}: {}", e, preview(&response_text, 200)))
        })?;

        first_text(&parsed)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ProviderError::Response("no text content in Gemini response".into()))
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(serde_json::Value),
}

/// Text of the first candidate's first part, the only place the plan lives.
fn first_text(resp: &GeminiResponse) -> Option<&str> {
    match resp.candidates.first()?.content.parts.first()? {
        Part::Text { text } if !text.trim().is_empty() => Some(text.as_str()),
        _ => None,
    }
}
