//! The endpoint fallback fetcher.

use em_core::{Credential, ResourceDescriptor, SourceConfig};
use em_http::Transport;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::endpoints::{EndpointAttempt, SourceEndpoints};
use crate::error::FetchError;

/// A successful read.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    /// The response body, exactly as parsed.
    pub payload: Value,
    /// The attempt that produced it.
    pub attempt: EndpointAttempt,
    /// Requests made, including the successful one.
    pub attempts_made: usize,
}

/// Reads a resource by walking the fallback chain.
///
/// The first attempt answering 2xx with a JSON body wins; later attempts are
/// never made. Non-2xx statuses, non-JSON bodies, and transport errors move on
/// to the next attempt.
#[derive(Debug, Clone)]
pub struct SourceFetcher<T> {
    transport: T,
    config: SourceConfig,
    endpoints: SourceEndpoints,
}

impl<T: Transport> SourceFetcher<T> {
    /// Creates a fetcher for the configured production hosts.
    pub fn new(transport: T, config: &SourceConfig) -> Result<Self, FetchError> {
        Ok(Self {
            transport,
            config: config.clone(),
            endpoints: SourceEndpoints::new(config)?,
        })
    }

    /// The endpoint table this fetcher walks.
    #[inline]
    #[must_use]
    pub fn endpoints(&self) -> &SourceEndpoints {
        &self.endpoints
    }

    /// Fetches the resource named by `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::AllEndpointsFailed`] once all six candidates and
    /// the alternate-header attempt have failed.
    pub async fn fetch_resource(
        &self,
        descriptor: &ResourceDescriptor,
        credential: &Credential,
    ) -> Result<Fetched, FetchError> {
        let mut attempts_made = 0;
        let mut last_failure = String::from("no endpoints attempted");

        for attempt in self.endpoints.attempts(descriptor) {
            attempts_made += 1;
            let headers = attempt
                .profile
                .headers(&self.config, descriptor.location_id(), credential);
            debug!(url = %attempt.url, profile = %attempt.profile, "Trying endpoint");

            match self.transport.get(&attempt.url, &headers).await {
                Ok(response) if response.is_success() => match response.json::<Value>() {
                    Ok(payload) => {
                        info!(
                            url = %attempt.url,
                            profile = %attempt.profile,
                            attempts = attempts_made,
                            "Fetched production data"
                        );
                        return Ok(Fetched {
                            payload,
                            attempt,
                            attempts_made,
                        });
                    }
                    Err(e) => {
                        warn!(url = %attempt.url, error = %e, "Endpoint returned a non-JSON body");
                        last_failure = format!("unparseable body from {}", attempt.url);
                    }
                },
                Ok(response) => {
                    debug!(url = %attempt.url, status = response.status, "Endpoint failed");
                    last_failure = format!("status {} from {}", response.status, attempt.url);
                }
                Err(e) => {
                    warn!(url = %attempt.url, error = %e, "Endpoint request failed");
                    last_failure = e.to_string();
                }
            }
        }

        Err(FetchError::AllEndpointsFailed {
            attempts: attempts_made,
            last_failure,
        })
    }
}
