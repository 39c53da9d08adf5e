//! Destination entity ids and the migration outcome envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Id of an entity created in the destination environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Machine-readable result of one migration, as reported to callers that
/// only speak JSON.
///
/// # Examples
///
/// ```
/// use em_core::{EntityId, MigrationOutcome};
///
/// let ok = MigrationOutcome::succeeded(&EntityId::new("tpl-1"));
/// assert!(ok.success);
///
/// let failed = MigrationOutcome::failed("Authentication token is required for API calls");
/// assert_eq!(failed.new_entity_id, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOutcome {
    /// Whether the migration completed.
    pub success: bool,

    /// Id of the created destination entity, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_entity_id: Option<EntityId>,

    /// Failure reason, verbatim, on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MigrationOutcome {
    /// Outcome for a completed migration.
    #[must_use]
    pub fn succeeded(new_entity_id: &EntityId) -> Self {
        Self {
            success: true,
            new_entity_id: Some(new_entity_id.clone()),
            error: None,
        }
    }

    /// Outcome for a failed migration.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            new_entity_id: None,
            error: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        insta::assert_json_snapshot!(MigrationOutcome::succeeded(&EntityId::new("abc123")), @r#"
        {
          "success": true,
          "newEntityId": "abc123"
        }
        "#);
    }

    #[test]
    fn test_failure_envelope() {
        insta::assert_json_snapshot!(MigrationOutcome::failed("boom"), @r#"
        {
          "success": false,
          "error": "boom"
        }
        "#);
    }

    #[test]
    fn test_entity_id_is_transparent() {
        let id: EntityId = serde_json::from_str(r#""xyz""#).unwrap();
        assert_eq!(id.as_str(), "xyz");
        assert_eq!(id.to_string(), "xyz");
    }
}
