use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{debug, info};

use crate::error::ConfigError;

/// Connection settings for the backend API and the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub auth_url: String,
    pub realm: String,
    pub client_id: String,
    /// How long a transient success notice stays visible.
    pub notice_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8090".to_string(),
            auth_url: "http://localhost:8080".to_string(),
            realm: "storefront".to_string(),
            client_id: "storefront-frontend".to_string(),
            notice_ttl: Duration::from_secs(3),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            api_url: try_load(&lookup, "STOREFRONT_API_URL", defaults.api_url)?,
            auth_url: try_load(&lookup, "KEYCLOAK_URL", defaults.auth_url)?,
            realm: try_load(&lookup, "KEYCLOAK_REALM", defaults.realm)?,
            client_id: try_load(&lookup, "KEYCLOAK_CLIENT_ID", defaults.client_id)?,
            notice_ttl: Duration::from_secs(try_load(
                &lookup,
                "STOREFRONT_NOTICE_SECS",
                defaults.notice_ttl.as_secs(),
            )?),
        })
    }

    /// OpenID Connect token endpoint of the configured realm.
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.auth_url.trim_end_matches('/'),
            self.realm
        )
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => {
            debug!("{key} set");
            raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            })
        }
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(
            config.token_endpoint(),
            "http://localhost:8080/realms/storefront/protocol/openid-connect/token"
        );
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STOREFRONT_API_URL", "https://shop.example.com"),
            ("KEYCLOAK_URL", "https://sso.example.com/"),
            ("STOREFRONT_NOTICE_SECS", "5"),
        ]);
        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_url, "https://shop.example.com");
        assert_eq!(config.notice_ttl, Duration::from_secs(5));
        assert!(config.token_endpoint().starts_with("https://sso.example.com/realms/"));

        let result = ClientConfig::from_lookup(|key| {
            (key == "STOREFRONT_NOTICE_SECS").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { key, .. }) if key == "STOREFRONT_NOTICE_SECS"));
    }
}
