//! Migration requests.

use em_core::{ResourceDescriptor, ResourceKind};

use crate::error::MigrationError;

/// Everything one migration run needs from its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    source: ResourceDescriptor,
    destination_location_id: String,
    credential_override: Option<String>,
}

impl MigrationRequest {
    /// Creates a request with no credential override.
    #[must_use]
    pub fn new(source: ResourceDescriptor, destination_location_id: impl Into<String>) -> Self {
        Self {
            source,
            destination_location_id: destination_location_id.into(),
            credential_override: None,
        }
    }

    /// Builds a request from loose strings, parsing `kind`.
    ///
    /// # Errors
    ///
    /// [`MigrationError::InvalidResourceKind`] unless `kind` is `template` or
    /// `campaign` (case-insensitive).
    pub fn parse(
        source_location_id: &str,
        source_entity_id: &str,
        destination_location_id: &str,
        kind: &str,
    ) -> Result<Self, MigrationError> {
        let kind: ResourceKind = kind.parse()?;
        Ok(Self::new(
            ResourceDescriptor::new(source_location_id, source_entity_id, kind),
            destination_location_id,
        ))
    }

    /// Sets the credential override. `None` and blank strings leave the
    /// resolver to search storage.
    #[must_use]
    pub fn with_credential_override(mut self, credential: Option<impl Into<String>>) -> Self {
        self.credential_override = credential.map(Into::into);
        self
    }

    /// The production resource.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &ResourceDescriptor {
        &self.source
    }

    /// The staging location receiving the new entity.
    #[inline]
    #[must_use]
    pub fn destination_location_id(&self) -> &str {
        &self.destination_location_id
    }

    /// The caller-supplied credential, if any.
    #[inline]
    #[must_use]
    pub fn credential_override(&self) -> Option<&str> {
        self.credential_override.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let request = MigrationRequest::parse("p", "e", "s", "Campaign").unwrap();
        assert_eq!(request.source().kind(), ResourceKind::Campaign);
        assert_eq!(request.destination_location_id(), "s");
        assert_eq!(request.credential_override(), None);
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let err = MigrationRequest::parse("p", "e", "s", "newsletter").unwrap_err();
        assert!(matches!(err, MigrationError::InvalidResourceKind(_)));
    }

    #[test]
    fn test_credential_override() {
        let request = MigrationRequest::parse("p", "e", "s", "template")
            .unwrap()
            .with_credential_override(Some("tok"));
        assert_eq!(request.credential_override(), Some("tok"));
    }
}
