use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use tracing::info;

use crate::config::{Domain, ProviderConfig};
use crate::errors::{GenerationFailure, GenerationOutcome, ProviderError};
use crate::fallback::degrade;
use crate::models::ImageRef;
use crate::policy::live_credential;
use crate::sanitize::preview;

const STUB_IMAGE_BASE: &str = "https://source.unsplash.com/800x600/?fitness";
const STUB_KEYWORDS: usize = 2;

/// What a live image provider hands back: a link, or the image itself.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedImage {
    Url(String),
    Bytes(Bytes),
}

impl GeneratedImage {
    /// Raw bytes become a `data:` URL so callers only ever see a URL.
    pub fn into_url(self) -> Result<String, ProviderError> {
        match self {
            GeneratedImage::Url(url) if url.trim().is_empty() => {
                Err(ProviderError::Response("empty image url".into()))
            }
            GeneratedImage::Url(url) => Ok(url),
            GeneratedImage::Bytes(bytes) if bytes.is_empty() => {
                Err(ProviderError::Response("empty image body".into()))
            }
            GeneratedImage::Bytes(bytes) => {
                let mime = ::image::guess_format(&bytes)
                    .map(|format| format.to_mime_type())
                    .unwrap_or("image/png");
                let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
                Ok(format!("data:{mime};base64,{encoded}"))
            }
        }
    }
}

#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate_image(&self, api_key: &str, prompt: &str) -> Result<GeneratedImage, ProviderError>;
}

/// Placeholder photo link built from the first significant words of the
/// prompt. Pure; no request is made to build it.
pub fn stub_image_url(prompt: &str) -> String {
    let keywords: Vec<String> = prompt
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .take(STUB_KEYWORDS)
        .collect();

    if keywords.is_empty() {
        STUB_IMAGE_BASE.to_string()
    } else {
        format!("{STUB_IMAGE_BASE},{}", keywords.join(","))
    }
}

/// Always yields a URL for a non-blank prompt; live failures degrade to the
/// placeholder.
pub async fn resolve_image(
    config: &ProviderConfig,
    provider: &dyn ImageProvider,
    prompt: &str,
) -> GenerationOutcome<ImageRef> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(GenerationFailure::invalid_input("Prompt is required"));
    }

    let url = match live_credential(Domain::Image, config) {
        None => {
            info!("🧪 Image stub mode for prompt: {}", preview(prompt, 60));
            stub_image_url(prompt)
        }
        Some(api_key) => {
            info!("🎨 Generating image for prompt: {}", preview(prompt, 60));
            let attempt = provider
                .generate_image(api_key, prompt)
                .await
                .and_then(GeneratedImage::into_url);
            degrade(Domain::Image, attempt, || stub_image_url(prompt))
        }
    };

    info!("🖼️ Image resolved: {}", preview(&url, 80));
    Ok(ImageRef { url })
}
