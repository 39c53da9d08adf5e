//! Configuration structures for the em-migration tool.
//!
//! This module provides configuration types for every stage of a migration:
//!
//! - [`SourceConfig`] - Production hosts and read header profile values
//! - [`DestinationConfig`] - Staging host and write header profile values
//! - [`CredentialConfig`] - Named storage slots probed for a token
//! - [`HttpConfig`] - Transport settings (timeout, user agent)
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with the values the
//! production and staging email builder APIs expect, so an empty JSON object
//! is a complete configuration.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Configuration for reading from the production API.
///
/// # Examples
///
/// ```
/// use em_core::SourceConfig;
///
/// let config = SourceConfig::default();
/// assert_eq!(config.api_version, "2021-07-28");
/// assert_eq!(config.credential_header, "token-id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the `services` host family.
    pub services_url: String,

    /// Base URL of the `backend` host family.
    pub backend_url: String,

    /// Value of the `version` header on standard read requests.
    pub api_version: String,

    /// Value of the `channel` header.
    pub channel: String,

    /// Value of the `source` header.
    pub source: String,

    /// Optional `istio-workload-name` header on standard read requests.
    pub workload_name: Option<String>,

    /// Header carrying the credential on standard read requests.
    pub credential_header: String,

    /// Value of the `accept` header on the alternate profile.
    pub alternate_accept: String,

    /// Header carrying the credential on the alternate profile.
    pub alternate_credential_header: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            services_url: "https://services.leadconnectorhq.com".to_owned(),
            backend_url: "https://backend.leadconnectorhq.com".to_owned(),
            api_version: "2021-07-28".to_owned(),
            channel: "APP".to_owned(),
            source: "WEB_USER".to_owned(),
            workload_name: None,
            credential_header: "token-id".to_owned(),
            alternate_accept: "application/json, text/plain, */*".to_owned(),
            alternate_credential_header: "token-id".to_owned(),
        }
    }
}

/// Configuration for writing to the staging API.
///
/// # Examples
///
/// ```
/// use em_core::DestinationConfig;
///
/// let config = DestinationConfig::default();
/// assert_eq!(config.channel, "ISTIO_MESH");
/// assert_eq!(config.title, "Migrated Template");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationConfig {
    /// Base URL of the staging email service.
    pub base_url: String,

    /// Value of the `version` header on write requests.
    pub api_version: String,

    /// Value of the `channel` header.
    pub channel: String,

    /// Value of the `source` header.
    pub source: String,

    /// Optional `istio-workload-name` header.
    pub workload_name: Option<String>,

    /// User id recorded as `updatedBy` on created and written entities.
    pub updated_by: String,

    /// Title given to newly created templates.
    pub title: String,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://staging.services.leadconnectorhq.internal".to_owned(),
            api_version: "2021-04-15".to_owned(),
            channel: "ISTIO_MESH".to_owned(),
            source: "EMAIL_BUILDER".to_owned(),
            workload_name: Some("emails".to_owned()),
            updated_by: "7Xw0wYJ99ufWXkfSrEQ0".to_owned(),
            title: "Migrated Template".to_owned(),
        }
    }
}

/// Configuration for credential discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Storage slot names probed, in order, before the full scan.
    pub slots: Vec<String>,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            slots: vec![
                "token-id".to_owned(),
                "_pendo_visitorId.undefined".to_owned(),
                "a".to_owned(),
            ],
        }
    }
}

/// Configuration for the HTTP transport.
///
/// # Examples
///
/// ```
/// use em_core::HttpConfig;
///
/// let config = HttpConfig::default();
/// assert_eq!(config.timeout_ms, 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Upper bound for a single request, in milliseconds.
    pub timeout_ms: u64,

    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            user_agent: concat!("em-migrate/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Root configuration for the em-migration tool.
///
/// # Examples
///
/// ```
/// use em_core::Config;
///
/// let config: Config = serde_json::from_str("{}").unwrap();
/// assert_eq!(config, Config::default());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Production read settings.
    pub source: SourceConfig,

    /// Staging write settings.
    pub destination: DestinationConfig,

    /// Credential discovery settings.
    pub credential: CredentialConfig,

    /// Transport settings.
    pub http: HttpConfig,
}

impl Config {
    /// Loads and validates a configuration file.
    ///
    /// Fields missing from the file take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist,
    /// [`ConfigError::Io`] or [`ConfigError::Parse`] if it cannot be read,
    /// and [`ConfigError::InvalidOption`] if validation fails.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_owned()));
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every base URL is an absolute `http`/`https` URL and that
    /// the transport settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url("source.services_url", &self.source.services_url)?;
        validate_base_url("source.backend_url", &self.source.backend_url)?;
        validate_base_url("destination.base_url", &self.destination.base_url)?;

        if self.source.credential_header.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "source.credential_header",
                "must not be empty",
            ));
        }
        if self.source.alternate_credential_header.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "source.alternate_credential_header",
                "must not be empty",
            ));
        }
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::invalid_option(
                "http.timeout_ms",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn validate_base_url(option: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::invalid_option(option, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::invalid_option(
            option,
            format!("unsupported scheme '{other}'"),
        )),
    }
}
