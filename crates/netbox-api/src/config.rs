//! Client configuration
//!
//! Plain settings struct that can be deserialized from any serde source or
//! loaded from the `NETBOX_*` environment variables.

use crate::auth::Authentication;
use crate::error::NetBoxError;
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Base URL used when `NETBOX_URL` is not set
pub const DEFAULT_URL: &str = "http://localhost:8000/api";

/// Settings for building a [`crate::NetBoxClient`]
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL, normalized by the client
    pub url: String,
    /// Username for HTTP Basic auth
    pub login: Option<String>,
    /// Password for HTTP Basic auth
    pub password: Option<String>,
    /// API token
    pub token: Option<String>,
    /// Request timeout; `None` keeps the HTTP library default
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Configuration for `url` without credentials
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// * `NETBOX_URL` - base URL (defaults to [`DEFAULT_URL`])
    /// * `NETBOX_LOGIN` / `NETBOX_PASSWORD` - Basic auth credentials
    /// * `NETBOX_TOKEN` - API token
    /// * `NETBOX_TIMEOUT_SECS` - request timeout in seconds
    pub fn from_env() -> Result<Self, NetBoxError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from a variable lookup; empty values count as unset
    fn from_lookup<F>(lookup: F) -> Result<Self, NetBoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let timeout_secs = match var("NETBOX_TIMEOUT_SECS") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| {
                NetBoxError::InvalidConfig(format!("NETBOX_TIMEOUT_SECS={raw}: {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            url: var("NETBOX_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
            login: var("NETBOX_LOGIN"),
            password: var("NETBOX_PASSWORD"),
            token: var("NETBOX_TOKEN"),
            timeout_secs,
        })
    }

    /// Resolve the credential fields into a single authentication mode
    pub fn authentication(&self) -> Result<Authentication, NetBoxError> {
        Authentication::from_parts(self.login.clone(), self.password.clone(), self.token.clone())
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.authentication().unwrap(), Authentication::None);
    }

    #[test]
    fn test_from_lookup_reads_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("NETBOX_URL", "https://netbox.example.com/api"),
            ("NETBOX_LOGIN", "admin"),
            ("NETBOX_PASSWORD", "admin"),
            ("NETBOX_TOKEN", ""),
            ("NETBOX_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://netbox.example.com/api");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.authentication().unwrap(), Authentication::basic("admin", "admin"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("NETBOX_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, NetBoxError::InvalidConfig(ref msg) if msg.contains("NETBOX_TIMEOUT_SECS=soon")));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "url": "netbox.local/api",
            "token": "abc",
        }))
        .unwrap();

        assert_eq!(config.url, "netbox.local/api");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.authentication().unwrap(), Authentication::token("abc"));
    }

    #[test]
    fn test_timeout() {
        let config = ClientConfig {
            timeout_secs: Some(30),
            ..ClientConfig::new("http://netbox/api")
        };
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_conflicting_credentials_rejected() {
        let config = ClientConfig {
            login: Some("admin".to_string()),
            password: Some("admin".to_string()),
            token: Some("abc".to_string()),
            ..ClientConfig::new("http://netbox/api")
        };
        assert!(matches!(config.authentication(), Err(NetBoxError::InvalidConfig(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ClientConfig {
            password: Some("hunter2".to_string()),
            token: Some("abc123".to_string()),
            ..ClientConfig::new("http://netbox/api")
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("abc123"));
    }
}
