//! Migration orchestration for em-migration.
//!
//! A [`Migrator`] runs one migration as a linear state machine:
//!
//! ```text
//! Idle ─► ResolvingCredential ─► Fetching ─► Normalizing ─► CreatingDestination ─► WritingData ─► Done
//!                 │                  │            │                  │                  │
//!                 └──────────────────┴────────────┴──────────────────┴──────────────────┴────► Error
//! ```
//!
//! Every stage is announced to a [`ProgressSink`] before it runs. A failure at
//! any stage ends the run with a [`MigrationError`] whose message is also
//! sent to the sink, verbatim.
//!
//! # Example
//!
//! ```no_run
//! use em_core::Config;
//! use em_pipeline::{Migrator, TracingSink};
//!
//! # async fn example() -> Result<(), em_pipeline::MigrationError> {
//! let migrator = Migrator::from_config(&Config::default())?;
//! let migrated = migrator
//!     .start_migration("prod-loc", "tpl-1", "staging-loc", "template", Some("eyJ..."), &TracingSink)
//!     .await?;
//! println!("created {}", migrated.new_entity_id);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod migrator;
pub mod policy;
pub mod progress;
pub mod request;

pub use error::MigrationError;
pub use migrator::{Migrated, MigrationResult, Migrator, outcome};
pub use policy::DestinationPolicy;
pub use progress::{FnSink, MigrationStage, ProgressSink, ProgressUpdate, TracingSink};
pub use request::MigrationRequest;
