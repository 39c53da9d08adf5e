//! Production editor URL parsing.
//!
//! Two editor surfaces link to migratable resources:
//!
//! ```text
//! https://app.gohighlevel.com/location/{loc}/emails/campaigns/create/{id}      campaign
//! https://app.gohighlevel.com/location/{loc}/emails/create/{id}/builder        template
//! https://email-builder-prod.web.app/?locationId={loc}&campaignId={id}         campaign
//! https://email-builder-prod.web.app/?locationId={loc}&templateId={id}         template
//! ```
//!
//! Campaign patterns are checked before template patterns on both hosts.

use url::Url;

use super::descriptor::{ResourceDescriptor, ResourceKind};

const APP_HOST: &str = "app.gohighlevel.com";
const BUILDER_HOST: &str = "email-builder-prod.web.app";

/// Location, entity, and kind extracted from an editor URL.
///
/// # Examples
///
/// ```
/// use em_core::{ResourceKind, SourceLink};
///
/// let link = SourceLink::parse(
///     "https://app.gohighlevel.com/location/loc42/emails/create/tpl7/builder",
/// ).unwrap();
/// assert_eq!(link.location_id, "loc42");
/// assert_eq!(link.entity_id, "tpl7");
/// assert_eq!(link.kind, ResourceKind::Template);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    /// Production location id.
    pub location_id: String,
    /// Template or campaign id.
    pub entity_id: String,
    /// Kind implied by the URL pattern.
    pub kind: ResourceKind,
}

impl SourceLink {
    /// Parses an editor URL.
    ///
    /// Returns `None` for unknown hosts or when the location, entity, or kind
    /// cannot all be determined.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let url = Url::parse(input.trim()).ok()?;
        match url.host_str()? {
            APP_HOST => Self::from_app_path(&url),
            BUILDER_HOST => Self::from_builder_query(&url),
            _ => None,
        }
    }

    /// Converts into a [`ResourceDescriptor`].
    #[must_use]
    pub fn into_descriptor(self) -> ResourceDescriptor {
        ResourceDescriptor::new(self.location_id, self.entity_id, self.kind)
    }

    fn from_app_path(url: &Url) -> Option<Self> {
        let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

        let location_id = segments
            .windows(2)
            .find(|w| w[0] == "location")
            .map(|w| w[1].to_owned())?;

        let campaign = segments
            .windows(4)
            .find(|w| w[..3] == ["emails", "campaigns", "create"])
            .map(|w| (w[3], ResourceKind::Campaign));
        let template = || {
            segments
                .windows(4)
                .find(|w| w[..2] == ["emails", "create"] && w[3] == "builder")
                .map(|w| (w[2], ResourceKind::Template))
        };

        let (entity_id, kind) = campaign.or_else(template)?;
        Some(Self {
            location_id,
            entity_id: entity_id.to_owned(),
            kind,
        })
    }

    fn from_builder_query(url: &Url) -> Option<Self> {
        let mut location_id = None;
        let mut campaign_id = None;
        let mut plain_id = None;
        let mut template_id = None;

        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            let slot = match &*key {
                "locationId" => &mut location_id,
                "campaignId" => &mut campaign_id,
                "id" => &mut plain_id,
                "templateId" => &mut template_id,
                _ => continue,
            };
            slot.get_or_insert_with(|| value.into_owned());
        }

        let (entity_id, kind) = match (campaign_id.or(plain_id), template_id) {
            (Some(id), _) => (id, ResourceKind::Campaign),
            (None, Some(id)) => (id, ResourceKind::Template),
            (None, None) => return None,
        };

        Some(Self {
            location_id: location_id?,
            entity_id,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_campaign_url() {
        let link = SourceLink::parse(
            "https://app.gohighlevel.com/location/abc/emails/campaigns/create/cmp1?tab=design",
        )
        .unwrap();
        assert_eq!(
            link,
            SourceLink {
                location_id: "abc".to_owned(),
                entity_id: "cmp1".to_owned(),
                kind: ResourceKind::Campaign,
            }
        );
    }

    #[test]
    fn test_app_url_without_entity() {
        assert!(SourceLink::parse("https://app.gohighlevel.com/location/abc/emails/home").is_none());
    }

    #[test]
    fn test_app_url_without_location() {
        assert!(SourceLink::parse("https://app.gohighlevel.com/emails/create/t1/builder").is_none());
    }

    #[test]
    fn test_builder_campaign_query() {
        let link =
            SourceLink::parse("https://email-builder-prod.web.app/?locationId=L1&id=C9").unwrap();
        assert_eq!(link.kind, ResourceKind::Campaign);
        assert_eq!(link.entity_id, "C9");
    }

    #[test]
    fn test_builder_campaign_id_wins_over_template_id() {
        let link = SourceLink::parse(
            "https://email-builder-prod.web.app/editor?locationId=L1&templateId=T1&campaignId=C1",
        )
        .unwrap();
        assert_eq!(link.kind, ResourceKind::Campaign);
        assert_eq!(link.entity_id, "C1");
    }

    #[test]
    fn test_builder_template_query() {
        let descriptor =
            SourceLink::parse("https://email-builder-prod.web.app/?templateId=T1&locationId=L1")
                .unwrap()
                .into_descriptor();
        assert_eq!(descriptor, ResourceDescriptor::new("L1", "T1", ResourceKind::Template));
    }

    #[test]
    fn test_builder_query_without_location() {
        assert!(SourceLink::parse("https://email-builder-prod.web.app/?templateId=T1").is_none());
    }

    #[test]
    fn test_unknown_host() {
        assert!(SourceLink::parse("https://example.com/location/a/emails/create/b/builder").is_none());
        assert!(SourceLink::parse("not a url").is_none());
    }
}
