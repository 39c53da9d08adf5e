//! Error types for the em-credential crate.

use camino::Utf8PathBuf;

/// Errors raised while loading a [`StorageSnapshot`](crate::StorageSnapshot).
///
/// Resolution itself never fails: a missing credential is `None`.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read storage snapshot {path}: {source}")]
    Read {
        /// The snapshot path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON.
    #[error("storage snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The snapshot JSON is not an object of key/value pairs.
    #[error("storage snapshot must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mentions_path() {
        let err = SnapshotError::Read {
            path: Utf8PathBuf::from("/tmp/storage.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/tmp/storage.json"));
    }

    #[test]
    fn test_not_an_object_display() {
        let err = SnapshotError::NotAnObject("array");
        assert_eq!(
            err.to_string(),
            "storage snapshot must be a JSON object, found array"
        );
    }
}
