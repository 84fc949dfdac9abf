use std::fmt;

use serde::Serialize;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const PLAN_STUB_ENV: &str = "PLAN_STUB_MODE";
pub const REPLICATE_API_KEY_ENV: &str = "REPLICATE_API_KEY";
pub const IMAGE_STUB_ENV: &str = "IMAGE_STUB_MODE";
pub const ELEVENLABS_API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
pub const TTS_STUB_ENV: &str = "TTS_STUB_MODE";

/// One of the three generation capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Plan,
    Image,
    Speech,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Domain::Plan => "plan",
            Domain::Image => "image",
            Domain::Speech => "speech",
        })
    }
}

/// Routing inputs for a single domain.
#[derive(Clone, Default)]
pub struct DomainConfig {
    pub api_key: Option<String>,
    pub stub_override: bool,
}

impl DomainConfig {
    #[cfg(test)]
    pub fn live(api_key: impl Into<String>) -> Self {
        Self { api_key: Some(api_key.into()), stub_override: false }
    }

    /// A key made only of whitespace counts as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}

impl fmt::Debug for DomainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainConfig")
            .field("api_key", &self.credential().map(|_| "***"))
            .field("stub_override", &self.stub_override)
            .finish()
    }
}

/// Snapshot of the per-domain routing configuration. Never mutated once
/// taken; a new snapshot is taken for every request.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub plan: DomainConfig,
    pub image: DomainConfig,
    pub speech: DomainConfig,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let domain = |key_var: &str, stub_var: &str| DomainConfig {
            api_key: lookup(key_var),
            stub_override: lookup(stub_var).is_some_and(|v| is_truthy(&v)),
        };
        Self {
            plan: domain(GEMINI_API_KEY_ENV, PLAN_STUB_ENV),
            image: domain(REPLICATE_API_KEY_ENV, IMAGE_STUB_ENV),
            speech: domain(ELEVENLABS_API_KEY_ENV, TTS_STUB_ENV),
        }
    }

    pub fn domain(&self, domain: Domain) -> &DomainConfig {
        match domain {
            Domain::Plan => &self.plan,
            Domain::Image => &self.image,
            Domain::Speech => &self.speech,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

/// Where handlers get their configuration snapshot from.
pub trait ConfigSource: Send + Sync {
    fn snapshot(&self) -> ProviderConfig;
}

/// Reads the process environment on every snapshot so that flag changes
/// apply to the next request.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigSource;

impl ConfigSource for EnvConfigSource {
    fn snapshot(&self) -> ProviderConfig {
        ProviderConfig::from_env()
    }
}

impl ConfigSource for ProviderConfig {
    fn snapshot(&self) -> ProviderConfig {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn reads_keys_and_flags_per_domain() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (GEMINI_API_KEY_ENV, "g-key"),
            (IMAGE_STUB_ENV, "TRUE"),
            (REPLICATE_API_KEY_ENV, "r-key"),
            (TTS_STUB_ENV, "false"),
        ]));

        assert_eq!(config.plan.credential(), Some("g-key"));
        assert!(!config.plan.stub_override);
        assert!(config.image.stub_override);
        assert_eq!(config.speech.credential(), None);
        assert!(!config.speech.stub_override);
    }

    #[test]
    fn blank_key_is_not_a_credential() {
        let config = DomainConfig { api_key: Some("   ".into()), stub_override: false };
        assert_eq!(config.credential(), None);
    }

    #[test]
    fn debug_output_hides_the_key() {
        let rendered = format!("{:?}", DomainConfig::live("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
