//! # Client Configuration
//!
//! Configuration for the REST API endpoint.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variable (highest priority)                             │
//! │     STOREFRONT_API_URL=https://shop.example.com/api/                    │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/storefront/client.toml (Linux)                            │
//! │     ~/Library/Application Support/com.storefront.engine/… (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     https://localhost:44347/api/, 10s connect, 30s request              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "https://shop.example.com/api/"
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//! ```

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// =============================================================================
// Defaults
// =============================================================================

/// Default backend endpoint (local development server).
pub const DEFAULT_API_URL: &str = "https://localhost:44347/api/";

/// Environment variable that overrides the configured base URL.
pub const ENV_API_URL: &str = "STOREFRONT_API_URL";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Client Config
// =============================================================================

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the entity paths are joined onto. Always ends with `/`.
    pub base_url: String,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Per-request timeout. No retries happen after it fires.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the platform config file and environment.
    ///
    /// Missing file or unset variable fall through to defaults. A file
    /// that exists but fails to parse is logged and ignored rather than
    /// aborting startup.
    pub fn load() -> Self {
        let file = config_file_path().and_then(|path| match read_config_file(&path) {
            Ok(file) => file,
            Err(err) => {
                warn!(path = %path.display(), %err, "Ignoring unreadable config file");
                None
            }
        });

        let env_url = std::env::var(ENV_API_URL).ok();
        let config = Self::resolve(file, env_url);
        debug!(base_url = %config.base_url, "Resolved client configuration");
        config
    }

    /// Applies the priority order: env override, then file, then defaults.
    fn resolve(file: Option<ConfigFile>, env_url: Option<String>) -> Self {
        let mut config = ClientConfig::default();

        if let Some(file) = file {
            if let Some(base_url) = file.api.base_url {
                config.base_url = base_url;
            }
            if let Some(secs) = file.api.connect_timeout_secs {
                config.connect_timeout = Duration::from_secs(secs);
            }
            if let Some(secs) = file.api.request_timeout_secs {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        if let Some(url) = env_url.filter(|url| !url.trim().is_empty()) {
            config.base_url = url;
        }

        config.base_url = normalize_base_url(config.base_url);
        config
    }
}

/// Ensures the base URL ends with `/` so `Url::join` keeps the last path
/// segment (`.../api` would otherwise drop `api` when joining `products`).
fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

// =============================================================================
// Config File
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Platform config file location: `<config dir>/client.toml`.
fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.config_dir().join("client.toml"))
}

fn read_config_file(path: &PathBuf) -> Result<Option<ConfigFile>, String> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path).map_err(|err| err.to_string())?;
    let file = toml::from_str(&raw).map_err(|err| err.to_string())?;
    Ok(Some(file))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = ClientConfig::resolve(None, None);
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_file_values_apply() {
        let file: ConfigFile = toml::from_str(
            r#"
            [api]
            base_url = "https://shop.example.com/api/"
            connect_timeout_secs = 5
            request_timeout_secs = 20
            "#,
        )
        .unwrap();

        let config = ClientConfig::resolve(Some(file), None);
        assert_eq!(config.base_url, "https://shop.example.com/api/");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [api]
            base_url = "https://from-file.example.com/api/"
            "#,
        )
        .unwrap();

        let config = ClientConfig::resolve(
            Some(file),
            Some("https://from-env.example.com/api/".to_string()),
        );
        assert_eq!(config.base_url, "https://from-env.example.com/api/");
    }

    #[test]
    fn test_blank_env_value_ignored() {
        let config = ClientConfig::resolve(None, Some("   ".to_string()));
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig::resolve(None, Some("https://shop.example.com/api".to_string()));
        assert_eq!(config.base_url, "https://shop.example.com/api/");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
            [api]
            request_timeout_secs = 60
            "#,
        )
        .unwrap();

        let config = ClientConfig::resolve(Some(file), None);
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }
}
