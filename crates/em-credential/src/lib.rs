//! Bearer credential resolution for the em-migration pipeline.
//!
//! A credential comes from one of three [`CredentialSource`]s, tried in
//! order by [`CredentialResolver`]:
//!
//! 1. an explicit override supplied by the caller,
//! 2. a fixed list of named storage slots,
//! 3. a full scan of every storage entry.
//!
//! Storage is never read directly. Callers hand in a [`StorageSnapshot`], so
//! each source is a pure function over key/value pairs and can be tested with
//! fabricated storage.
//!
//! # Example
//!
//! ```
//! use em_credential::{CredentialResolver, CredentialSource, StorageSnapshot};
//!
//! let snapshot = StorageSnapshot::from_pairs([
//!     ("theme", "dark"),
//!     ("token-id", "eyJhbGciOi.eyJzdWIi.c2ln"),
//! ]);
//!
//! let resolved = CredentialResolver::default().resolve(None, &snapshot).unwrap();
//! assert_eq!(resolved.source, CredentialSource::NamedSlot("token-id".to_owned()));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod resolver;
pub mod snapshot;
pub mod source;

pub use error::SnapshotError;
pub use resolver::{CredentialResolver, ResolvedCredential};
pub use snapshot::StorageSnapshot;
pub use source::CredentialSource;
