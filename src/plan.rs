use async_trait::async_trait;
use tracing::{error, info};

use crate::config::{Domain, ProviderConfig};
use crate::errors::{GenerationFailure, GenerationOutcome, ProviderError};
use crate::models::{FitnessPlan, UserProfile};
use crate::policy::live_credential;
use crate::prompt::build_prompt;
use crate::sanitize::{preview, sanitize_and_validate};
use crate::stub::generate_stub;

/// Live text provider for the plan domain.
#[async_trait]
pub trait PlanProvider: Send + Sync {
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// Stub path when the policy says so; otherwise one live call whose output
/// must pass validation. A failed live attempt is surfaced, not degraded.
pub async fn generate_plan(
    config: &ProviderConfig,
    provider: &dyn PlanProvider,
    profile: &UserProfile,
) -> GenerationOutcome<FitnessPlan> {
    let Some(api_key) = live_credential(Domain::Plan, config) else {
        info!("🧪 Using stub mode for plan generation");
        return Ok(generate_stub(profile));
    };

    let prompt = build_prompt(profile);
    info!("🎯 Requesting plan with prompt: {}", preview(&prompt, 100));

    let text = provider.generate_text(api_key, &prompt).await.map_err(|e| {
        error!("❌ Plan provider call failed: {}", e);
        GenerationFailure::provider(&e)
    })?;

    info!("📥 Plan provider returned {} chars", text.len());
    sanitize_and_validate(&text)
}
