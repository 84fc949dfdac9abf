use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::config::{Domain, ProviderConfig};
use crate::errors::{GenerationFailure, GenerationOutcome, ProviderError};
use crate::fallback::degrade;
use crate::policy::live_credential;

pub const DEFAULT_AUDIO_TYPE: &str = "audio/mpeg";

#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Either synthesized audio or an instruction to speak the text with the
/// consumer's own on-device voice. Both are successes.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechOutcome {
    Audio(AudioClip),
    UseLocalSynthesis,
}

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, api_key: &str, text: &str) -> Result<AudioClip, ProviderError>;
}

pub async fn synthesize_speech(
    config: &ProviderConfig,
    provider: &dyn SpeechProvider,
    text: &str,
) -> GenerationOutcome<SpeechOutcome> {
    if text.trim().is_empty() {
        return Err(GenerationFailure::invalid_input("Text is required"));
    }

    let Some(api_key) = live_credential(Domain::Speech, config) else {
        info!("🧪 TTS stub mode: signalling local synthesis");
        return Ok(SpeechOutcome::UseLocalSynthesis);
    };

    info!("🔊 Synthesizing {} chars of narration", text.len());
    let attempt = provider.synthesize(api_key, text).await.and_then(|clip| {
        if clip.bytes.is_empty() {
            Err(ProviderError::Response("empty audio body".into()))
        } else {
            Ok(SpeechOutcome::Audio(clip))
        }
    });
    Ok(degrade(Domain::Speech, attempt, || SpeechOutcome::UseLocalSynthesis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DomainConfig;
    use crate::errors::FailureKind;
    use crate::testing::FakeSpeechProvider;

    fn live() -> ProviderConfig {
        ProviderConfig { speech: DomainConfig::live("eleven-key"), ..ProviderConfig::default() }
    }

    fn clip(bytes: &'static [u8]) -> AudioClip {
        AudioClip { bytes: Bytes::from_static(bytes), content_type: DEFAULT_AUDIO_TYPE.into() }
    }

    #[tokio::test]
    async fn no_credential_signals_local_synthesis() {
        let provider = FakeSpeechProvider::returning(clip(b"ID3"));
        let outcome = synthesize_speech(&ProviderConfig::default(), &provider, "Hello").await.unwrap();
        assert_eq!(outcome, SpeechOutcome::UseLocalSynthesis);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn live_audio_is_returned() {
        let provider = FakeSpeechProvider::returning(clip(b"ID3\x04"));
        let outcome = synthesize_speech(&live(), &provider, "Hello").await.unwrap();
        assert_eq!(outcome, SpeechOutcome::Audio(clip(b"ID3\x04")));
    }

    #[tokio::test]
    async fn live_error_signals_local_synthesis() {
        let provider = FakeSpeechProvider::failing("401 unauthorized");
        let outcome = synthesize_speech(&live(), &provider, "Hello").await.unwrap();
        assert_eq!(outcome, SpeechOutcome::UseLocalSynthesis);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn empty_audio_signals_local_synthesis() {
        let provider = FakeSpeechProvider::returning(clip(b""));
        let outcome = synthesize_speech(&live(), &provider, "Hello").await.unwrap();
        assert_eq!(outcome, SpeechOutcome::UseLocalSynthesis);
    }

    #[tokio::test]
    async fn stub_override_skips_provider() {
        let config = ProviderConfig {
            speech: DomainConfig { api_key: Some("eleven-key".into()), stub_override: true },
            ..ProviderConfig::default()
        };
        let provider = FakeSpeechProvider::returning(clip(b"ID3"));
        let outcome = synthesize_speech(&config, &provider, "Hello").await.unwrap();
        assert_eq!(outcome, SpeechOutcome::UseLocalSynthesis);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn blank_text_is_caller_error() {
        let provider = FakeSpeechProvider::failing("unused");
        let failure = synthesize_speech(&live(), &provider, "\n").await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::InvalidInput);
    }
}
