//! Resource kinds and descriptors.
//!
//! A [`ResourceDescriptor`] names one production resource: the location it
//! lives in, its id, and whether it is a template or a campaign.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseKindError;

/// The kind of email builder resource being migrated.
///
/// The kind decides which production endpoints are probed. It does not decide
/// the destination shape; see the destination policy in `em-pipeline`.
///
/// # Examples
///
/// ```
/// use em_core::ResourceKind;
///
/// let kind: ResourceKind = "campaign".parse().unwrap();
/// assert_eq!(kind, ResourceKind::Campaign);
/// assert!("newsletter".parse::<ResourceKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A reusable email template.
    #[default]
    Template,

    /// A scheduled email campaign.
    Campaign,
}

impl ResourceKind {
    /// Returns the lowercase wire name of this kind.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Campaign => "campaign",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "campaign" => Ok(Self::Campaign),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

/// Identifies one production resource.
///
/// Constructed once per migration run and never mutated.
///
/// # Examples
///
/// ```
/// use em_core::{ResourceDescriptor, ResourceKind};
///
/// let descriptor = ResourceDescriptor::new("loc-1", "tpl-9", ResourceKind::Template);
/// assert_eq!(descriptor.location_id(), "loc-1");
/// assert_eq!(descriptor.to_string(), "template loc-1/tpl-9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    location_id: String,
    entity_id: String,
    kind: ResourceKind,
}

impl ResourceDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        location_id: impl Into<String>,
        entity_id: impl Into<String>,
        kind: ResourceKind,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            entity_id: entity_id.into(),
            kind,
        }
    }

    /// The production location (sub-account) id.
    #[inline]
    #[must_use]
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    /// The template or campaign id.
    #[inline]
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// The resource kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.location_id, self.entity_id)
    }
}
