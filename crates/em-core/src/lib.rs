//! Core types, configuration, and errors for the em-migration tool.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - Configuration structures ([`Config`] and its sections)
//! - Error types ([`ConfigError`], [`ParseKindError`])
//! - Domain types ([`ResourceDescriptor`], [`Credential`], [`RawPayload`],
//!   [`CanonicalDocument`], [`MigrationOutcome`])
//! - Editor link parsing ([`SourceLink`])
//!
//! # Crate Dependencies
//!
//! ```text
//! em-cli ──► em-pipeline ──► em-source ──► em-http ──► em-core
//!                       ├─► em-dest ─────────►
//!                       └─► em-credential ──────────────►
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, CredentialConfig, DestinationConfig, HttpConfig, SourceConfig};
pub use error::{ConfigError, ParseKindError};
pub use types::{
    CanonicalDocument, Credential, EntityId, MigrationOutcome, RawPayload, ResourceDescriptor,
    ResourceKind, SourceLink,
};
