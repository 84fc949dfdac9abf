use tracing::{error, info};

use crate::config::Domain;
use crate::errors::ProviderError;

/// Consumes the outcome of a live call, substituting the local fallback
/// when the call failed.
pub fn degrade<T>(
    domain: Domain,
    attempt: Result<T, ProviderError>,
    fallback: impl FnOnce() -> T,
) -> T {
    match attempt {
        Ok(value) => value,
        Err(e) => {
            error!("❌ Live {} generation failed: {}", domain, e);
            info!("🔄 Falling back to local {} output", domain);
            fallback()
        }
    }
}
