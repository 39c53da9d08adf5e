//! Candidate read endpoints and the attempt sequence.

use em_core::{ResourceDescriptor, ResourceKind, SourceConfig};
use url::Url;

use crate::error::FetchError;
use crate::profile::ProfileKind;

/// The two production host families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Host {
    Services,
    Backend,
}

/// One candidate: a host family, the path prefix placed before
/// `{location}/{entity}`, and whether `isInternal=true` is appended.
#[derive(Debug, Clone, Copy)]
struct PathShape {
    host: Host,
    prefix: &'static [&'static str],
    internal: bool,
}

const fn shape(host: Host, prefix: &'static [&'static str], internal: bool) -> PathShape {
    PathShape {
        host,
        prefix,
        internal,
    }
}

const BUILDER_DATA: &[&str] = &["emails", "builder", "data"];
const BUILDER: &[&str] = &["emails", "builder"];
const SCHEDULE_TEMPLATE_DATA: &[&str] = &["emails", "schedule", "template-data"];
const SCHEDULE: &[&str] = &["emails", "schedule"];
const SCHEDULE_DATA: &[&str] = &["emails", "schedule", "data"];

const TEMPLATE_SHAPES: [PathShape; 6] = [
    shape(Host::Services, BUILDER_DATA, true),
    shape(Host::Backend, BUILDER_DATA, true),
    shape(Host::Services, BUILDER, false),
    shape(Host::Backend, BUILDER, false),
    shape(Host::Services, BUILDER_DATA, false),
    shape(Host::Backend, BUILDER_DATA, false),
];

const CAMPAIGN_SHAPES: [PathShape; 6] = [
    shape(Host::Services, SCHEDULE_TEMPLATE_DATA, false),
    shape(Host::Backend, SCHEDULE, false),
    shape(Host::Services, SCHEDULE_DATA, false),
    shape(Host::Backend, SCHEDULE_DATA, false),
    shape(Host::Services, SCHEDULE, false),
    shape(Host::Backend, SCHEDULE_TEMPLATE_DATA, false),
];

const fn shapes(kind: ResourceKind) -> &'static [PathShape; 6] {
    match kind {
        ResourceKind::Template => &TEMPLATE_SHAPES,
        ResourceKind::Campaign => &CAMPAIGN_SHAPES,
    }
}

/// One request in the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAttempt {
    /// Full request URL.
    pub url: String,
    /// Headers to send.
    pub profile: ProfileKind,
}

/// Builds candidate URLs against the configured production hosts.
///
/// # Examples
///
/// ```
/// use em_core::{ResourceDescriptor, ResourceKind, SourceConfig};
/// use em_source::{ProfileKind, SourceEndpoints};
///
/// let endpoints = SourceEndpoints::new(&SourceConfig::default()).unwrap();
/// let descriptor = ResourceDescriptor::new("loc", "tpl", ResourceKind::Template);
///
/// let attempts: Vec<_> = endpoints.attempts(&descriptor).collect();
/// assert_eq!(attempts.len(), 7);
/// assert_eq!(
///     attempts[0].url,
///     "https://services.leadconnectorhq.com/emails/builder/data/loc/tpl?isInternal=true"
/// );
/// assert_eq!(attempts[6].profile, ProfileKind::Alternate);
/// assert_eq!(attempts[6].url, attempts[0].url);
/// ```
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    services: Url,
    backend: Url,
}

impl SourceEndpoints {
    /// Parses the configured host base URLs.
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        Ok(Self {
            services: parse_base("source.services_url", &config.services_url)?,
            backend: parse_base("source.backend_url", &config.backend_url)?,
        })
    }

    /// The six candidate URLs for a descriptor, in fallback order.
    pub fn candidates<'a>(
        &'a self,
        descriptor: &'a ResourceDescriptor,
    ) -> impl Iterator<Item = String> + 'a {
        shapes(descriptor.kind())
            .iter()
            .map(move |shape| self.url_for(shape, descriptor))
    }

    /// The full attempt sequence: every candidate with the standard profile,
    /// then the first candidate once more with the alternate profile.
    ///
    /// URLs are built as the sequence is consumed.
    pub fn attempts<'a>(
        &'a self,
        descriptor: &'a ResourceDescriptor,
    ) -> impl Iterator<Item = EndpointAttempt> + 'a {
        let first = &shapes(descriptor.kind())[0];
        let alternate = std::iter::once_with(move || EndpointAttempt {
            url: self.url_for(first, descriptor),
            profile: ProfileKind::Alternate,
        });

        self.candidates(descriptor)
            .map(|url| EndpointAttempt {
                url,
                profile: ProfileKind::Standard,
            })
            .chain(alternate)
    }

    fn url_for(&self, shape: &PathShape, descriptor: &ResourceDescriptor) -> String {
        let mut url = match shape.host {
            Host::Services => self.services.clone(),
            Host::Backend => self.backend.clone(),
        };

        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(shape.prefix)
                .push(descriptor.location_id())
                .push(descriptor.entity_id());
        }
        url.set_query(shape.internal.then_some("isInternal=true"));

        url.into()
    }
}

fn parse_base(option: &'static str, value: &str) -> Result<Url, FetchError> {
    let url = Url::parse(value).map_err(|e| FetchError::InvalidEndpoint {
        option,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidEndpoint {
            option,
            reason: "URL cannot carry a path".to_owned(),
        });
    }
    Ok(url)
}
