//! Destination shape policy.

use em_core::ResourceKind;

/// Decides which staging shape a migrated resource is written as.
///
/// Staging entities are always created as templates. With the default
/// [`AlwaysTemplate`](Self::AlwaysTemplate) policy the data write matches
/// that, so a production campaign lands in staging as a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DestinationPolicy {
    /// Write every resource as a template.
    #[default]
    AlwaysTemplate,

    /// Write campaigns through the campaign data endpoint.
    ///
    /// The entity is still created as a blank template.
    FollowSourceKind,
}

impl DestinationPolicy {
    /// The write target for a resource of kind `source`.
    #[must_use]
    pub const fn target(self, source: ResourceKind) -> ResourceKind {
        match self {
            Self::AlwaysTemplate => ResourceKind::Template,
            Self::FollowSourceKind => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_template() {
        let policy = DestinationPolicy::default();
        assert_eq!(policy.target(ResourceKind::Template), ResourceKind::Template);
        assert_eq!(policy.target(ResourceKind::Campaign), ResourceKind::Template);
    }

    #[test]
    fn test_follow_source_kind() {
        let policy = DestinationPolicy::FollowSourceKind;
        assert_eq!(policy.target(ResourceKind::Campaign), ResourceKind::Campaign);
    }
}
