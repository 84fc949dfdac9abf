use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::ProviderError;
use crate::image::{GeneratedImage, ImageProvider};
use crate::sanitize::preview;

const DEFAULT_BASE: &str = "https://api.replicate.com/v1";
/// stability-ai/sdxl
const SDXL_VERSION: &str = "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b";

pub struct ReplicateClient {
    client: Client,
    base_url: String,
    version: String,
}

impl ReplicateClient {
    pub fn new(client: Client) -> Self {
        let base_url = std::env::var("REPLICATE_API_BASE").unwrap_or_else(|_| DEFAULT_BASE.to_string());
        Self { client, base_url, version: SDXL_VERSION.to_string() }
    }
}

#[async_trait]
impl ImageProvider for ReplicateClient {
    async fn generate_image(&self, api_key: &str, prompt: &str) -> Result<GeneratedImage, ProviderError> {
        let url = format!("{}/predictions", self.base_url.trim_end_matches('/'));
        info!("🔗 Making request to: {}", url);

        let body = json!({
            "version": self.version,
            "input": {
                "prompt": prompt,
                "width": 768,
                "height": 768,
                "refine": "expert_ensemble_refiner"
            }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ Replicate API error response: {}", preview(&error_body, 500));
            return Err(ProviderError::Status { status: status.as_u16(), body: error_body });
        }

        let is_image = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("image/"));
        if is_image {
            return Ok(GeneratedImage::Bytes(response.bytes().await?));
        }

        let prediction: Prediction = response
            .json()
            .await
            .map_err(|e| ProviderError::Response(format!("parse error: {e}")))?;
        prediction.into_image()
    }
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    status: String,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl Prediction {
    fn into_image(self) -> Result<GeneratedImage, ProviderError> {
        if matches!(self.status.as_str(), "failed" | "canceled") {
            let reason = self.error.map(|e| e.to_string()).unwrap_or_default();
            return Err(ProviderError::Response(format!("prediction {}: {}", self.status, reason)));
        }
        self.output
            .as_ref()
            .and_then(first_output_url)
            .map(GeneratedImage::Url)
            .ok_or_else(|| {
                ProviderError::Response(format!("prediction has no output (status {:?})", self.status))
            })
    }
}

/// SDXL answers with a list of URLs; some models answer with a single one.
fn first_output_url(output: &Value) -> Option<String> {
    match output {
        Value::String(url) => Some(url.clone()),
        Value::Array(items) => items.iter().find_map(|item| item.as_str().map(str::to_string)),
        _ => None,
    }
}
