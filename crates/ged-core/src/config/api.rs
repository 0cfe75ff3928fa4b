//! Remote API endpoint configuration.

use serde::{Deserialize, Serialize};

/// Hosts treated as a local development machine.
const LOCAL_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explicit base URL; wins over host-based selection when set.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Base URL used when running on a local host.
    #[serde(default = "default_local_base_url")]
    pub local_base_url: String,
    /// Base URL of the deployed API.
    #[serde(default = "default_remote_base_url")]
    pub remote_base_url: String,
    /// Host name the client is running on.
    #[serde(default = "default_host")]
    pub host: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Resolve the base URL: explicit override, else local vs deployed by host.
    pub fn resolved_base_url(&self) -> String {
        let url = match &self.base_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ if self.is_local_host() => self.local_base_url.clone(),
            _ => self.remote_base_url.clone(),
        };
        url.trim_end_matches('/').to_string()
    }

    /// Whether the configured host is a local development host.
    pub fn is_local_host(&self) -> bool {
        LOCAL_HOSTS.contains(&self.host.trim())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            local_base_url: default_local_base_url(),
            remote_base_url: default_remote_base_url(),
            host: default_host(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_local_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_remote_base_url() -> String {
    "https://api-globaltty3-little-sea-9182.fly.dev".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_host_selects_local_url() {
        let config = ApiConfig::default();
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:8000");

        let ipv6 = ApiConfig {
            host: "[::1]".into(),
            ..ApiConfig::default()
        };
        assert!(ipv6.is_local_host());
    }

    #[test]
    fn test_remote_host_selects_deployed_url() {
        let config = ApiConfig {
            host: "app.globaltty.com".into(),
            ..ApiConfig::default()
        };
        assert_eq!(config.resolved_base_url(), default_remote_base_url());
    }

    #[test]
    fn test_explicit_base_url_wins_and_is_trimmed() {
        let config = ApiConfig {
            base_url: Some("http://example.test:9000/".into()),
            host: "app.globaltty.com".into(),
            ..ApiConfig::default()
        };
        assert_eq!(config.resolved_base_url(), "http://example.test:9000");
    }
}
