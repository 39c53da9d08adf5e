//! Payload normalization.

use em_core::{CanonicalDocument, RawPayload};
use em_http::{HeaderProfile, Transport};
use tracing::{debug, warn};

/// Turns a classified production payload into a [`CanonicalDocument`].
///
/// Normalization never fails. The only network call is the optional preview
/// fetch for `editorData` payloads, and its failure just leaves the html empty.
#[derive(Debug, Clone)]
pub struct Normalizer<T> {
    transport: T,
}

impl<T: Transport> Normalizer<T> {
    /// Creates a normalizer that fetches previews through `transport`.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Normalizes `payload`.
    ///
    /// - `EditorData`: design from `editorData`; html from one GET of
    ///   `previewUrl` if present and answering 2xx, else empty.
    /// - `Dnd`: design from `dnd`, html from `html` or empty.
    /// - `Unknown`: the empty design and empty html.
    pub async fn normalize(&self, payload: RawPayload) -> CanonicalDocument {
        debug!(shape = payload.shape(), "Normalizing production payload");
        match payload {
            RawPayload::EditorData {
                editor_data,
                preview_url,
            } => {
                let html = match preview_url {
                    Some(url) => self.fetch_preview(&url).await.unwrap_or_default(),
                    None => String::new(),
                };
                CanonicalDocument::new(editor_data, html)
            }
            RawPayload::Dnd { dnd, html } => CanonicalDocument::new(dnd, html.unwrap_or_default()),
            RawPayload::Unknown => {
                warn!("No editor data found in production response");
                CanonicalDocument::empty()
            }
        }
    }

    async fn fetch_preview(&self, url: &str) -> Option<String> {
        match self.transport.get(url, &HeaderProfile::new()).await {
            Ok(response) if response.is_success() => Some(response.body),
            Ok(response) => {
                warn!(url, status = response.status, "Could not fetch html from preview URL");
                None
            }
            Err(e) => {
                warn!(url, error = %e, "Could not fetch html from preview URL");
                None
            }
        }
    }
}
