//! Error types for the em-http crate.

/// Errors raised by a [`Transport`](crate::Transport) before a response
/// status is available.
///
/// A response with a non-2xx status is *not* an error at this layer; callers
/// decide what a status means.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// The requested URL.
        url: String,
    },

    /// The host could not be reached.
    #[error("could not connect to {url}: {reason}")]
    Unreachable {
        /// The requested URL.
        url: String,
        /// Underlying reason.
        reason: String,
    },

    /// Any other request failure (invalid header, TLS, body read).
    #[error("request to {url} failed: {source}")]
    Request {
        /// The requested URL.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Classifies a `reqwest` error raised while requesting `url`.
    #[must_use]
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_owned(),
            }
        } else if source.is_connect() {
            Self::Unreachable {
                url: url.to_owned(),
                reason: source.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_owned(),
                source,
            }
        }
    }

    /// The URL the failed request targeted, if known.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Client(_) => None,
            Self::Timeout { url } | Self::Unreachable { url, .. } | Self::Request { url, .. } => {
                Some(url)
            }
        }
    }
}
