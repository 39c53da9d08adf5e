//! Migration stages and progress reporting.

use std::fmt;

use tokio::sync::mpsc;
use tracing::{info, warn};

/// Where a migration run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MigrationStage {
    /// Not started.
    #[default]
    Idle,
    /// Looking for a credential.
    ResolvingCredential,
    /// Walking the production endpoint chain.
    Fetching,
    /// Converting the production payload.
    Normalizing,
    /// Creating the blank staging entity.
    CreatingDestination,
    /// Posting design and html into the new entity.
    WritingData,
    /// Finished successfully.
    Done,
    /// Stopped on a failure.
    Error,
}

impl MigrationStage {
    /// The message announced when this stage starts.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Idle => "Waiting to start",
            Self::ResolvingCredential => "Extracting authentication token...",
            Self::Fetching => "Fetching data from production...",
            Self::Normalizing => "Preparing production data...",
            Self::CreatingDestination => "Creating new template in staging...",
            Self::WritingData => "Updating staging template with production data...",
            Self::Done => "Migration completed successfully!",
            Self::Error => "Migration failed",
        }
    }

    /// Returns `true` for `Done` and `Error`.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

impl fmt::Display for MigrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::ResolvingCredential => "resolving-credential",
            Self::Fetching => "fetching",
            Self::Normalizing => "normalizing",
            Self::CreatingDestination => "creating-destination",
            Self::WritingData => "writing-data",
            Self::Done => "done",
            Self::Error => "error",
        })
    }
}

/// One progress notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// The stage being entered.
    pub stage: MigrationStage,
    /// Human-readable status.
    pub message: String,
}

impl ProgressUpdate {
    /// The update announcing `stage` with its standard message.
    #[must_use]
    pub fn entering(stage: MigrationStage) -> Self {
        Self {
            stage,
            message: stage.message().to_owned(),
        }
    }

    /// The terminal update for a failure; `message` is the failure reason.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: MigrationStage::Error,
            message: message.into(),
        }
    }
}

/// Receives progress notifications.
///
/// Delivery is fire-and-forget: a sink that can no longer deliver drops the
/// update, and the migration carries on.
pub trait ProgressSink: Send + Sync {
    /// Delivers one update.
    fn send(&self, update: ProgressUpdate);
}

impl ProgressSink for mpsc::UnboundedSender<ProgressUpdate> {
    fn send(&self, update: ProgressUpdate) {
        // Receiver gone: nobody is listening any more.
        let _ = mpsc::UnboundedSender::send(self, update);
    }
}

/// Adapts a closure into a [`ProgressSink`].
///
/// ```
/// use em_pipeline::{FnSink, MigrationStage, ProgressSink, ProgressUpdate};
///
/// let sink = FnSink(|update: ProgressUpdate| assert_eq!(update.stage, MigrationStage::Fetching));
/// sink.send(ProgressUpdate::entering(MigrationStage::Fetching));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F> ProgressSink for FnSink<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn send(&self, update: ProgressUpdate) {
        (self.0)(update);
    }
}

/// Logs every update through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn send(&self, update: ProgressUpdate) {
        if update.stage == MigrationStage::Error {
            warn!(stage = %update.stage, "{}", update.message);
        } else {
            info!(stage = %update.stage, "{}", update.message);
        }
    }
}
