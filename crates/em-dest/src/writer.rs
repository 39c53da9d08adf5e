//! The staging writer.

use em_core::{CanonicalDocument, DestinationConfig, EntityId, ResourceKind};
use em_http::{HeaderProfile, HttpResponse, Transport};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::body::{CreateBody, CreateResponse, WriteBody};
use crate::error::DestinationError;

const CREATE_PATH: &[&str] = &["emails", "builder"];
const TEMPLATE_DATA_PATH: &[&str] = &["emails", "builder", "data"];
const CAMPAIGN_DATA_PATH: &[&str] = &["emails", "schedule", "template-data"];

/// Creates entities in staging and writes migrated data into them.
///
/// Both calls are single attempts. A second `create_entity` for the same
/// location creates a second entity.
#[derive(Debug, Clone)]
pub struct DestinationWriter<T> {
    transport: T,
    config: DestinationConfig,
    create_url: String,
    template_data_url: String,
    campaign_data_url: String,
}

impl<T: Transport> DestinationWriter<T> {
    /// Creates a writer for the configured staging host.
    pub fn new(transport: T, config: &DestinationConfig) -> Result<Self, DestinationError> {
        let base = Url::parse(&config.base_url).map_err(|e| DestinationError::InvalidEndpoint {
            option: "destination.base_url",
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(DestinationError::InvalidEndpoint {
                option: "destination.base_url",
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            transport,
            config: config.clone(),
            create_url: join(&base, CREATE_PATH),
            template_data_url: join(&base, TEMPLATE_DATA_PATH),
            campaign_data_url: join(&base, CAMPAIGN_DATA_PATH),
        })
    }

    /// URL of the create call.
    #[inline]
    #[must_use]
    pub fn create_url(&self) -> &str {
        &self.create_url
    }

    /// URL of the data write for `target`.
    #[must_use]
    pub fn data_url(&self, target: ResourceKind) -> &str {
        match target {
            ResourceKind::Template => &self.template_data_url,
            ResourceKind::Campaign => &self.campaign_data_url,
        }
    }

    /// Headers sent on every staging call for `location_id`.
    #[must_use]
    pub fn headers(&self, location_id: &str) -> HeaderProfile {
        HeaderProfile::new()
            .with("version", self.config.api_version.as_str())
            .with("channel", self.config.channel.as_str())
            .with("source", self.config.source.as_str())
            .with("source-id", location_id)
            .with_optional("istio-workload-name", self.config.workload_name.as_deref())
            .with("Content-Type", "application/json")
    }

    /// Creates a blank template in `location_id` and returns its id.
    ///
    /// # Errors
    ///
    /// [`DestinationError::CreateFailed`] on a transport failure, a non-2xx
    /// status, an unreadable body, or a body with neither `id` nor
    /// `redirect`.
    pub async fn create_entity(&self, location_id: &str) -> Result<EntityId, DestinationError> {
        let body = serde_json::to_value(CreateBody::new(location_id, &self.config))
            .map_err(|e| DestinationError::create_failed(e.to_string()))?;

        debug!(url = %self.create_url, location_id, "Creating blank template");
        let response = self
            .transport
            .post_json(&self.create_url, &self.headers(location_id), &body)
            .await
            .map_err(|e| DestinationError::create_failed(e.to_string()))?;

        if !response.is_success() {
            return Err(DestinationError::create_failed(status_line(&response)));
        }

        let entity_id = response
            .json::<CreateResponse>()
            .map_err(|e| DestinationError::create_failed(format!("unreadable response: {e}")))?
            .into_entity_id()
            .ok_or_else(|| DestinationError::create_failed("response carried no template id"))?;

        info!(location_id, entity_id = %entity_id, "Created staging template");
        Ok(entity_id)
    }

    /// Writes `document` into the entity `entity_id`.
    ///
    /// `target` selects the template or campaign write endpoint and id key.
    /// Returns the response body when it is JSON; staging does not always
    /// send one.
    ///
    /// # Errors
    ///
    /// [`DestinationError::WriteFailed`] on a transport failure or a non-2xx
    /// status. The entity is not removed.
    pub async fn write_data(
        &self,
        location_id: &str,
        entity_id: &EntityId,
        document: &CanonicalDocument,
        target: ResourceKind,
    ) -> Result<Option<Value>, DestinationError> {
        let body = serde_json::to_value(WriteBody::new(
            location_id,
            entity_id,
            document,
            target,
            &self.config,
        ))
        .map_err(|e| DestinationError::write_failed(e.to_string()))?;

        let url = self.data_url(target);
        debug!(
            url,
            entity_id = %entity_id,
            target = %target,
            html_bytes = document.html_content.len(),
            "Writing data to staging"
        );
        let response = self
            .transport
            .post_json(url, &self.headers(location_id), &body)
            .await
            .map_err(|e| DestinationError::write_failed(e.to_string()))?;

        if !response.is_success() {
            return Err(DestinationError::write_failed(status_line(&response)));
        }

        info!(entity_id = %entity_id, target = %target, "Wrote staging data");
        Ok(response.json().ok())
    }
}

fn join(base: &Url, path: &[&str]) -> String {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(path);
    }
    url.into()
}

fn status_line(response: &HttpResponse) -> String {
    format!("{} {}", response.status, response.status_text())
        .trim_end()
        .to_owned()
}
