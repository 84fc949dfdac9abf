use serde::Serialize;

use crate::config::{Domain, ProviderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderPath {
    Live,
    Stub,
}

/// Stub iff the domain has no credential or its stub override is set.
pub fn select_path(domain: Domain, config: &ProviderConfig) -> ProviderPath {
    let settings = config.domain(domain);
    if settings.stub_override || settings.credential().is_none() {
        ProviderPath::Stub
    } else {
        ProviderPath::Live
    }
}

/// The credential to call the live provider with, present only when the
/// policy picks the live path.
pub fn live_credential(domain: Domain, config: &ProviderConfig) -> Option<&str> {
    match select_path(domain, config) {
        ProviderPath::Live => config.domain(domain).credential(),
        ProviderPath::Stub => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, DomainConfig};
    use std::sync::Mutex;

    #[test]
    fn missing_credential_routes_to_stub() {
        let config = ProviderConfig::default();
        for domain in [Domain::Plan, Domain::Image, Domain::Speech] {
            assert_eq!(select_path(domain, &config), ProviderPath::Stub);
            assert_eq!(live_credential(domain, &config), None);
        }
    }

    #[test]
    fn override_wins_over_credential() {
        let config = ProviderConfig {
            image: DomainConfig { api_key: Some("key".into()), stub_override: true },
            ..ProviderConfig::default()
        };
        assert_eq!(select_path(Domain::Image, &config), ProviderPath::Stub);
    }

    #[test]
    fn domains_route_independently() {
        let config = ProviderConfig {
            plan: DomainConfig::live("g"),
            image: DomainConfig { api_key: Some("r".into()), stub_override: true },
            speech: DomainConfig::live("e"),
        };
        assert_eq!(select_path(Domain::Plan, &config), ProviderPath::Live);
        assert_eq!(select_path(Domain::Image, &config), ProviderPath::Stub);
        assert_eq!(live_credential(Domain::Speech, &config), Some("e"));
    }

    struct Toggle(Mutex<bool>);

    impl ConfigSource for Toggle {
        fn snapshot(&self) -> ProviderConfig {
            let stub_override = *self.0.lock().unwrap();
            ProviderConfig {
                speech: DomainConfig { api_key: Some("key".into()), stub_override },
                ..ProviderConfig::default()
            }
        }
    }

    #[test]
    fn toggling_override_applies_on_next_snapshot() {
        let source = Toggle(Mutex::new(false));
        assert_eq!(select_path(Domain::Speech, &source.snapshot()), ProviderPath::Live);

        *source.0.lock().unwrap() = true;
        assert_eq!(select_path(Domain::Speech, &source.snapshot()), ProviderPath::Stub);

        *source.0.lock().unwrap() = false;
        assert_eq!(select_path(Domain::Speech, &source.snapshot()), ProviderPath::Live);
    }
}
