//! Reading a resource from the production API.
//!
//! The production API serves the same resource from several hosts and paths,
//! not all of which work for every account. This crate turns that into a
//! deterministic fallback chain and normalizes whatever shape comes back.
//!
//! # Overview
//!
//! - [`endpoints`] - the six candidate URLs per [`ResourceKind`](em_core::ResourceKind)
//!   and the lazy [`EndpointAttempt`] sequence built from them
//! - [`profile`] - the standard and alternate read header profiles
//! - [`fetcher`] - [`SourceFetcher`], which walks the sequence until the first
//!   2xx JSON response
//! - [`normalizer`] - [`Normalizer`], which turns a [`RawPayload`](em_core::RawPayload)
//!   into a [`CanonicalDocument`](em_core::CanonicalDocument)
//!
//! # Fallback chain
//!
//! ```text
//! candidate 1 ─┐
//! candidate 2  │ standard headers, first 2xx + JSON wins
//!     ...      │
//! candidate 6 ─┘
//! candidate 1    alternate headers, exactly once
//! ```
//!
//! Attempts are strictly sequential. Nothing is retried, cached, or backed
//! off.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod endpoints;
pub mod error;
pub mod fetcher;
pub mod normalizer;
pub mod profile;

pub use endpoints::{EndpointAttempt, SourceEndpoints};
pub use error::FetchError;
pub use fetcher::{Fetched, SourceFetcher};
pub use normalizer::Normalizer;
pub use profile::ProfileKind;
