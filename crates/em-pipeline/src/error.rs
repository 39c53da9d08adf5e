//! Error types for the em-pipeline crate.
//!
//! Component crates fail with their own errors. [`MigrationError`] is where
//! they meet: each component error converts into exactly one variant, and the
//! variant's message is what the progress sink and the CLI show.

use em_core::{EntityId, ParseKindError};
use em_dest::DestinationError;
use em_http::TransportError;
use em_source::FetchError;

/// Why a migration stopped.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// No override was given and no storage entry held a credential.
    #[error("Authentication token is required for API calls")]
    CredentialNotFound,

    /// Every production read attempt failed.
    #[error(transparent)]
    AllEndpointsFailed(FetchError),

    /// The requested kind is neither `template` nor `campaign`.
    #[error(transparent)]
    InvalidResourceKind(#[from] ParseKindError),

    /// The staging entity could not be created.
    #[error(transparent)]
    CreateFailed(DestinationError),

    /// The staging entity was created but the data write failed.
    #[error(transparent)]
    WriteFailed(DestinationError),

    /// The HTTP client could not be set up.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A configured base URL was rejected.
    #[error("invalid endpoint '{option}': {reason}")]
    InvalidEndpoint {
        /// The configuration option holding the URL.
        option: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The run was cancelled before it finished.
    #[error("Migration cancelled")]
    Cancelled {
        /// The staging entity, if cancellation came after it was created.
        created: Option<EntityId>,
    },
}

impl MigrationError {
    /// Returns `true` if the run failed after a staging entity was created,
    /// leaving it behind.
    #[must_use]
    pub const fn leaves_orphan(&self) -> bool {
        matches!(
            self,
            Self::WriteFailed(_) | Self::Cancelled { created: Some(_) }
        )
    }

    /// Returns `true` if the run was cancelled.
    #[inline]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Records `id` as created on a cancellation that carries no entity yet.
    /// Other errors pass through unchanged.
    #[must_use]
    pub(crate) fn with_created(self, id: &EntityId) -> Self {
        match self {
            Self::Cancelled { created: None } => Self::Cancelled {
                created: Some(id.clone()),
            },
            other => other,
        }
    }
}

impl From<FetchError> for MigrationError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidEndpoint { option, reason } => Self::InvalidEndpoint { option, reason },
            exhausted @ FetchError::AllEndpointsFailed { .. } => Self::AllEndpointsFailed(exhausted),
        }
    }
}

impl From<DestinationError> for MigrationError {
    fn from(err: DestinationError) -> Self {
        match err {
            DestinationError::InvalidEndpoint { option, reason } => {
                Self::InvalidEndpoint { option, reason }
            }
            create @ DestinationError::CreateFailed { .. } => Self::CreateFailed(create),
            write @ DestinationError::WriteFailed { .. } => Self::WriteFailed(write),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_not_found_message() {
        assert_eq!(
            MigrationError::CredentialNotFound.to_string(),
            "Authentication token is required for API calls"
        );
    }

    #[test]
    fn test_fetch_error_conversion() {
        let err = MigrationError::from(FetchError::AllEndpointsFailed {
            attempts: 7,
            last_failure: "status 404".to_owned(),
        });
        assert!(matches!(err, MigrationError::AllEndpointsFailed(_)));
        assert!(err.to_string().starts_with("Failed to fetch data from production"));

        let err = MigrationError::from(FetchError::InvalidEndpoint {
            option: "source.backend_url",
            reason: "bad".to_owned(),
        });
        assert!(matches!(err, MigrationError::InvalidEndpoint { option: "source.backend_url", .. }));
    }

    #[test]
    fn test_destination_error_conversion() {
        let err = MigrationError::from(DestinationError::create_failed("500 Internal Server Error"));
        assert!(matches!(err, MigrationError::CreateFailed(_)));
        assert!(!err.leaves_orphan());

        let err = MigrationError::from(DestinationError::write_failed("502 Bad Gateway"));
        assert!(matches!(err, MigrationError::WriteFailed(_)));
        assert!(err.leaves_orphan());
        assert_eq!(err.to_string(), "Failed to update entity data: 502 Bad Gateway");
    }

    #[test]
    fn test_cancellation_after_create_leaves_orphan() {
        let before = MigrationError::Cancelled { created: None };
        assert!(before.is_cancelled());
        assert!(!before.leaves_orphan());

        let after = before.with_created(&EntityId::new("new-1"));
        assert!(after.is_cancelled());
        assert!(after.leaves_orphan());
        assert_eq!(after.to_string(), "Migration cancelled");
    }

    #[test]
    fn test_with_created_keeps_other_errors() {
        let err = MigrationError::CredentialNotFound.with_created(&EntityId::new("new-1"));
        assert!(matches!(err, MigrationError::CredentialNotFound));
    }

    #[test]
    fn test_invalid_kind_message() {
        let err = MigrationError::from("newsletter".parse::<em_core::ResourceKind>().unwrap_err());
        assert!(err.to_string().contains("newsletter"));
    }
}
