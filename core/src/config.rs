//! Client configuration, resolved once when a `ProductClient` is built.

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const API_URL_VAR: &str = "API_URL";

/// Validated client configuration. Deserializing goes through
/// [`ClientConfig::new`], so a bad `baseUrl` is rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawClientConfig")]
pub struct ClientConfig {
    pub base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClientConfig {
    base_url: String,
}

impl TryFrom<RawClientConfig> for ClientConfig {
    type Error = ConfigError;

    fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
        Self::new(&raw.base_url)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: base_url.to_string(),
        })
    }

    /// Read `API_URL`, loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(API_URL_VAR).map_err(|_| ConfigError::Missing(API_URL_VAR))?;
        let config = Self::new(&base_url)?;
        tracing::debug!(base_url = %config.base_url, "client config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::client::ProductClient;

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ClientConfig::new("http://localhost:4000//").unwrap();
        assert_eq!(config.base_url, "http://localhost:4000");
    }

    #[test]
    fn base_url_needs_http_scheme() {
        let err = ClientConfig::new("localhost:4000").unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl("localhost:4000".to_string()));
    }

    #[test]
    fn deserializes_base_url_option() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"baseUrl":"https://api.example.com/"}"#).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn deserializing_rejects_base_url_without_scheme() {
        let err = serde_json::from_str::<ClientConfig>(r#"{"baseUrl":"api.example.com"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid base url"), "{err}");
    }

    #[test]
    #[serial]
    fn from_env_reads_api_url() {
        std::env::remove_var(API_URL_VAR);
        assert_eq!(ClientConfig::from_env(), Err(ConfigError::Missing(API_URL_VAR)));
        assert!(matches!(
            ProductClient::from_env(),
            Err(ConfigError::Missing(API_URL_VAR))
        ));

        std::env::set_var(API_URL_VAR, "http://localhost:4000/");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:4000");
        let client = ProductClient::from_env().unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");

        std::env::set_var(API_URL_VAR, "localhost:4000");
        assert_eq!(
            ClientConfig::from_env(),
            Err(ConfigError::InvalidBaseUrl("localhost:4000".to_string()))
        );

        std::env::remove_var(API_URL_VAR);
    }
}
