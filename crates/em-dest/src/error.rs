//! Error types for the em-dest crate.

/// Errors raised while writing to staging.
#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    /// The configured staging base URL cannot carry endpoint paths.
    #[error("invalid destination endpoint '{option}': {reason}")]
    InvalidEndpoint {
        /// The configuration option holding the URL.
        option: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The blank entity could not be created.
    #[error("Failed to create template in staging: {reason}")]
    CreateFailed {
        /// Status line or transport failure.
        reason: String,
    },

    /// The entity was created but its data could not be written.
    #[error("Failed to update entity data: {reason}")]
    WriteFailed {
        /// Status line or transport failure.
        reason: String,
    },
}

impl DestinationError {
    /// Creates a [`DestinationError::CreateFailed`].
    #[must_use]
    pub fn create_failed(reason: impl Into<String>) -> Self {
        Self::CreateFailed {
            reason: reason.into(),
        }
    }

    /// Creates a [`DestinationError::WriteFailed`].
    #[must_use]
    pub fn write_failed(reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            reason: reason.into(),
        }
    }

    /// Returns `true` if a staging entity may have been left behind.
    #[inline]
    #[must_use]
    pub const fn leaves_orphan(&self) -> bool {
        matches!(self, Self::WriteFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_failed_display() {
        let err = DestinationError::create_failed("500 Internal Server Error");
        assert_eq!(
            err.to_string(),
            "Failed to create template in staging: 500 Internal Server Error"
        );
        assert!(!err.leaves_orphan());
    }

    #[test]
    fn test_write_failed_display() {
        let err = DestinationError::write_failed("502 Bad Gateway");
        assert_eq!(err.to_string(), "Failed to update entity data: 502 Bad Gateway");
        assert!(err.leaves_orphan());
    }
}
