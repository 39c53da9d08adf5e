//! Error types for the em-source crate.

/// Errors raised while reading from production.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A configured base URL cannot carry endpoint paths.
    #[error("invalid source endpoint '{option}': {reason}")]
    InvalidEndpoint {
        /// The configuration option holding the URL.
        option: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Every attempt in the fallback chain failed.
    #[error(
        "Failed to fetch data from production: All endpoints failed ({attempts} attempts, last: {last_failure})"
    )]
    AllEndpointsFailed {
        /// Number of requests made, including the alternate-header attempt.
        attempts: usize,
        /// Description of the final failure.
        last_failure: String,
    },
}

impl FetchError {
    /// Returns `true` if the chain ran and every endpoint failed.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::AllEndpointsFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_endpoints_failed_display() {
        let err = FetchError::AllEndpointsFailed {
            attempts: 7,
            last_failure: "status 403".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to fetch data from production: All endpoints failed"));
        assert!(msg.contains("7 attempts"));
        assert!(err.is_exhausted());
    }

    #[test]
    fn test_invalid_endpoint_is_not_exhausted() {
        let err = FetchError::InvalidEndpoint {
            option: "source.services_url",
            reason: "relative URL without a base".to_owned(),
        };
        assert!(!err.is_exhausted());
        assert!(err.to_string().contains("source.services_url"));
    }
}
