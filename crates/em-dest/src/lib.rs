//! Writing a migrated resource to staging.
//!
//! Migration into staging is two calls: [`DestinationWriter::create_entity`]
//! creates a blank template and returns its id, then
//! [`DestinationWriter::write_data`] posts the design and html into it.
//! Nothing is rolled back: if the write fails, the blank entity stays.
//!
//! # Example
//!
//! ```no_run
//! use em_core::{CanonicalDocument, DestinationConfig, HttpConfig, ResourceKind};
//! use em_dest::DestinationWriter;
//! use em_http::ReqwestTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::new(&HttpConfig::default())?;
//! let writer = DestinationWriter::new(transport, &DestinationConfig::default())?;
//!
//! let id = writer.create_entity("staging-loc").await?;
//! writer
//!     .write_data("staging-loc", &id, &CanonicalDocument::empty(), ResourceKind::Template)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod body;
pub mod error;
pub mod writer;

pub use body::{CreateBody, CreateResponse, WriteBody};
pub use error::DestinationError;
pub use writer::DestinationWriter;
