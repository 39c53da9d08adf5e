//! HTTP transport for the em-migration pipeline.
//!
//! Every network call the pipeline makes goes through the [`Transport`]
//! trait: a GET carrying a [`HeaderProfile`], or a POST with a JSON body.
//! [`ReqwestTransport`] is the production implementation. With the `mock`
//! feature enabled, [`mock::MockTransport`] answers from a script and records
//! every request, which is how the other crates test their fallback and
//! write logic without a network.
//!
//! # Example
//!
//! ```no_run
//! use em_core::HttpConfig;
//! use em_http::{HeaderProfile, ReqwestTransport, Transport};
//!
//! # async fn example() -> Result<(), em_http::TransportError> {
//! let transport = ReqwestTransport::new(&HttpConfig::default())?;
//! let headers = HeaderProfile::new().with("channel", "APP");
//! let response = transport.get("https://services.example.com/health", &headers).await?;
//! println!("status {}", response.status);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod headers;
#[cfg(feature = "mock")]
pub mod mock;
pub mod response;
pub mod transport;

pub use error::TransportError;
pub use headers::HeaderProfile;
pub use response::HttpResponse;
pub use transport::{Method, ReqwestTransport, Transport};
