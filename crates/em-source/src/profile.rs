//! Read header profiles.

use std::fmt;

use em_core::{Credential, SourceConfig};
use em_http::HeaderProfile;

const CONTENT_TYPE_JSON: &str = "application/json";

/// Which set of headers an attempt sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// `version`, `channel`, `source`, `source-id`, optional
    /// `istio-workload-name`, the credential header, `Content-Type`.
    Standard,

    /// `accept`, `channel`, `source`, `source-id`, the alternate credential
    /// header, `Content-Type`. No `version`.
    Alternate,
}

impl ProfileKind {
    /// Builds the headers for a read of a resource in `location_id`.
    #[must_use]
    pub fn headers(
        self,
        config: &SourceConfig,
        location_id: &str,
        credential: &Credential,
    ) -> HeaderProfile {
        match self {
            Self::Standard => HeaderProfile::new()
                .with("version", config.api_version.as_str())
                .with("channel", config.channel.as_str())
                .with("source", config.source.as_str())
                .with("source-id", location_id)
                .with_optional("istio-workload-name", config.workload_name.as_deref())
                .with(config.credential_header.as_str(), credential.expose())
                .with("Content-Type", CONTENT_TYPE_JSON),
            Self::Alternate => HeaderProfile::new()
                .with("accept", config.alternate_accept.as_str())
                .with("channel", config.channel.as_str())
                .with("source", config.source.as_str())
                .with("source-id", location_id)
                .with(config.alternate_credential_header.as_str(), credential.expose())
                .with("Content-Type", CONTENT_TYPE_JSON),
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "standard",
            Self::Alternate => "alternate",
        })
    }
}
