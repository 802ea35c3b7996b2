//! Client configuration.

use serde::Deserialize;
use std::path::Path;

use crate::error::ClientError;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.withorb.com/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Paths searched for a secrets file, in order.
const SECRET_PATHS: [&str; 3] = [".secrets/orb.json", "../.secrets/orb.json", "../../.secrets/orb.json"];

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL (default: [`DEFAULT_BASE_URL`]).
    pub base_url: String,
    /// Request timeout in seconds (default: 60).
    pub timeout_seconds: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("orb-billing-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// API key plus options, as loaded from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Transport options.
    pub options: ClientOptions,
}

/// Secrets file structure.
#[derive(Debug, Deserialize)]
struct OrbSecrets {
    api_key: String,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_seconds: Option<u64>,
}

impl ClientConfig {
    /// Load configuration from a secrets file, falling back to environment
    /// variables.
    ///
    /// The secrets file is `.secrets/orb.json` (also searched in parent
    /// directories) with `api_key` and optional `base_url` and
    /// `timeout_seconds`. The environment variables are `ORB_API_KEY`
    /// (required), `ORB_BASE_URL`, and `ORB_TIMEOUT_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if no API key is found.
    pub fn from_env() -> Result<Self, ClientError> {
        for path in &SECRET_PATHS {
            if Path::new(path).exists() {
                let config = Self::from_secrets_file(path)?;
                tracing::info!(path = %path, "Loaded Orb secrets from file");
                return Ok(config);
            }
        }

        tracing::debug!("Orb secrets file not found, using environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a JSON secrets file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the file cannot be read or
    /// parsed.
    pub fn from_secrets_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let secrets: OrbSecrets = serde_json::from_str(&contents).map_err(|e| {
            ClientError::Configuration(format!("invalid secrets file {}: {e}", path.display()))
        })?;

        let mut options = ClientOptions::default();
        if let Some(base_url) = secrets.base_url {
            options.base_url = base_url;
        }
        if let Some(timeout) = secrets.timeout_seconds {
            options.timeout_seconds = timeout;
        }
        Ok(Self {
            api_key: secrets.api_key,
            options,
        })
    }

    /// Build configuration from a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if `ORB_API_KEY` is missing or
    /// `ORB_TIMEOUT_SECONDS` is not a number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let api_key = lookup("ORB_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ClientError::Configuration("ORB_API_KEY is not set".into()))?;

        let mut options = ClientOptions::default();
        if let Some(base_url) = lookup("ORB_BASE_URL") {
            options.base_url = base_url;
        }
        if let Some(timeout) = lookup("ORB_TIMEOUT_SECONDS") {
            options.timeout_seconds = timeout.parse().map_err(|_| {
                ClientError::Configuration(format!("ORB_TIMEOUT_SECONDS is not a number: {timeout}"))
            })?;
        }
        Ok(Self { api_key, options })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "https://api.withorb.com/v1");
        assert_eq!(options.timeout_seconds, 60);
        assert!(options.user_agent.starts_with("orb-billing-client/"));
    }

    #[test]
    fn builder_setters() {
        let options = ClientOptions::default()
            .with_base_url("http://localhost:9000")
            .with_timeout_seconds(5)
            .with_user_agent("test");
        assert_eq!(options.base_url, "http://localhost:9000");
        assert_eq!(options.timeout_seconds, 5);
        assert_eq!(options.user_agent, "test");
    }

    #[test]
    fn lookup_requires_api_key() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));

        let err = ClientConfig::from_lookup(lookup(&[("ORB_API_KEY", "")])).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn lookup_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ORB_API_KEY", "sk_test"),
            ("ORB_BASE_URL", "http://localhost:9000"),
            ("ORB_TIMEOUT_SECONDS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "sk_test");
        assert_eq!(config.options.base_url, "http://localhost:9000");
        assert_eq!(config.options.timeout_seconds, 10);
    }

    #[test]
    fn lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("ORB_API_KEY", "sk_test"),
            ("ORB_TIMEOUT_SECONDS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("ORB_TIMEOUT_SECONDS"));
    }

    #[test]
    fn secrets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_key":"sk_file","base_url":"http://mock"}}"#).unwrap();

        let config = ClientConfig::from_secrets_file(file.path()).unwrap();
        assert_eq!(config.api_key, "sk_file");
        assert_eq!(config.options.base_url, "http://mock");
        assert_eq!(config.options.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn invalid_secrets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = ClientConfig::from_secrets_file(file.path()).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }
}
