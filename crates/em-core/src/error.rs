//! Error types for the em-core crate.
//!
//! This module provides [`ConfigError`] for configuration loading and
//! validation, and [`ParseKindError`] for rejected resource kinds.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use em_core::ConfigError;
///
/// let error = ConfigError::invalid_option("source.services_url", "relative URL without base");
/// assert!(error.to_string().contains("source.services_url"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {0}")]
    NotFound(Utf8PathBuf),

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The dotted name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// A resource kind string that is neither `template` nor `campaign`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid builder type: '{0}'")]
pub struct ParseKindError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("http.timeout_ms", "must be positive");
        let msg = error.to_string();
        assert!(msg.contains("http.timeout_ms"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_not_found_display() {
        let error = ConfigError::NotFound(Utf8PathBuf::from("/missing/em.json"));
        assert!(error.to_string().contains("/missing/em.json"));
    }

    #[test]
    fn test_parse_kind_error_display() {
        let error = ParseKindError("newsletter".to_owned());
        assert_eq!(error.to_string(), "Invalid builder type: 'newsletter'");
    }
}
