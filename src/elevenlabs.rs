use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::json;
use tracing::{error, info};

use crate::errors::ProviderError;
use crate::sanitize::preview;
use crate::speech::{AudioClip, SpeechProvider, DEFAULT_AUDIO_TYPE};

const DEFAULT_BASE: &str = "https://api.elevenlabs.io/v1";
/// "Rachel"
const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
const MODEL_ID: &str = "eleven_monolingual_v1";

pub struct ElevenLabsClient {
    client: Client,
    base_url: String,
    voice_id: String,
}

impl ElevenLabsClient {
    pub fn new(client: Client) -> Self {
        let base_url = std::env::var("ELEVENLABS_API_BASE").unwrap_or_else(|_| DEFAULT_BASE.to_string());
        let voice_id = std::env::var("ELEVENLABS_VOICE_ID").unwrap_or_else(|_| DEFAULT_VOICE_ID.to_string());
        Self { client, base_url, voice_id }
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsClient {
    async fn synthesize(&self, api_key: &str, text: &str) -> Result<AudioClip, ProviderError> {
        let url = format!("{}/text-to-speech/{}", self.base_url.trim_end_matches('/'), self.voice_id);
        info!("🔗 Making request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .header(header::ACCEPT, DEFAULT_AUDIO_TYPE)
            .json(&json!({ "text": text, "model_id": MODEL_ID }))
            .send()
            .await?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ ElevenLabs API error response: {}", preview(&error_body, 500));
            return Err(ProviderError::Status { status: status.as_u16(), body: error_body });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|ct| ct.starts_with("audio/"))
            .unwrap_or(DEFAULT_AUDIO_TYPE)
            .to_string();
        let bytes = response.bytes().await?;
        info!("🎧 Received {} bytes of {}", bytes.len(), content_type);

        Ok(AudioClip { bytes, content_type })
    }
}
