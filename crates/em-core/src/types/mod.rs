//! Domain types for the em-migration tool.
//!
//! # Module Organization
//!
//! - [`descriptor`] - Resource kinds and source descriptors
//! - [`credential`] - Opaque bearer credentials
//! - [`document`] - Raw production payloads and the canonical document
//! - [`outcome`] - Destination entity ids and the migration outcome envelope
//! - [`link`] - Production editor URL parsing
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use em_core::{CanonicalDocument, ResourceDescriptor, ResourceKind};
//! ```

pub mod credential;
pub mod descriptor;
pub mod document;
pub mod link;
pub mod outcome;

pub use credential::Credential;
pub use descriptor::{ResourceDescriptor, ResourceKind};
pub use document::{CanonicalDocument, RawPayload};
pub use link::SourceLink;
pub use outcome::{EntityId, MigrationOutcome};
