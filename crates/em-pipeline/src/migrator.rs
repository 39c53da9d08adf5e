//! The migration orchestrator.

use std::future::Future;

use em_core::{Config, EntityId, MigrationOutcome, RawPayload};
use em_credential::{CredentialResolver, StorageSnapshot};
use em_dest::DestinationWriter;
use em_http::{ReqwestTransport, Transport};
use em_source::{Normalizer, SourceFetcher};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::MigrationError;
use crate::policy::DestinationPolicy;
use crate::progress::{MigrationStage, ProgressSink, ProgressUpdate};
use crate::request::MigrationRequest;

/// A completed migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migrated {
    /// Id of the staging entity holding the migrated data.
    pub new_entity_id: EntityId,
    /// Production URL the data was read from.
    pub source_url: String,
}

/// The single result of a migration run.
pub type MigrationResult = Result<Migrated, MigrationError>;

/// Converts a run result into the serializable outcome envelope.
#[must_use]
pub fn outcome(result: &MigrationResult) -> MigrationOutcome {
    match result {
        Ok(migrated) => MigrationOutcome::succeeded(&migrated.new_entity_id),
        Err(e) => MigrationOutcome::failed(e.to_string()),
    }
}

/// Runs migrations from production to staging.
///
/// A `Migrator` holds no per-run state; one instance can run any number of
/// migrations. Runs are strictly sequential internally and share nothing, so
/// two concurrent runs against the same staging location create two
/// entities.
#[derive(Debug, Clone)]
pub struct Migrator<T> {
    resolver: CredentialResolver,
    snapshot: StorageSnapshot,
    fetcher: SourceFetcher<T>,
    normalizer: Normalizer<T>,
    writer: DestinationWriter<T>,
    policy: DestinationPolicy,
    cancel: CancellationToken,
}

impl Migrator<ReqwestTransport> {
    /// Builds a migrator using the real HTTP transport.
    pub fn from_config(config: &Config) -> Result<Self, MigrationError> {
        let transport = ReqwestTransport::new(&config.http)?;
        Self::new(transport, config)
    }
}

impl<T: Transport + Clone> Migrator<T> {
    /// Builds a migrator whose every stage shares `transport`.
    ///
    /// Starts with an empty storage snapshot, the
    /// [`AlwaysTemplate`](DestinationPolicy::AlwaysTemplate) policy, and a
    /// cancellation token nobody holds.
    pub fn new(transport: T, config: &Config) -> Result<Self, MigrationError> {
        Ok(Self {
            resolver: CredentialResolver::new(&config.credential),
            snapshot: StorageSnapshot::new(),
            fetcher: SourceFetcher::new(transport.clone(), &config.source)?,
            normalizer: Normalizer::new(transport.clone()),
            writer: DestinationWriter::new(transport, &config.destination)?,
            policy: DestinationPolicy::default(),
            cancel: CancellationToken::new(),
        })
    }

    /// Sets the storage searched when no override is given.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: StorageSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Sets the destination policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DestinationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ties runs to `token`: once it is cancelled, in-flight and future runs
    /// stop with [`MigrationError::Cancelled`].
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The source fetcher, for inspecting the endpoint chain.
    #[inline]
    #[must_use]
    pub fn fetcher(&self) -> &SourceFetcher<T> {
        &self.fetcher
    }

    /// The destination writer.
    #[inline]
    #[must_use]
    pub fn writer(&self) -> &DestinationWriter<T> {
        &self.writer
    }

    /// The credential resolver.
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    /// Parses `resource_kind` and runs the migration.
    ///
    /// An unknown kind fails before any stage starts and is reported to
    /// `sink` like any other failure.
    pub async fn start_migration<S: ProgressSink + ?Sized>(
        &self,
        source_location_id: &str,
        source_entity_id: &str,
        destination_location_id: &str,
        resource_kind: &str,
        credential_override: Option<&str>,
        sink: &S,
    ) -> MigrationResult {
        let request = match MigrationRequest::parse(
            source_location_id,
            source_entity_id,
            destination_location_id,
            resource_kind,
        ) {
            Ok(request) => request.with_credential_override(credential_override),
            Err(e) => return Err(report_failure(e, sink)),
        };
        self.run(&request, sink).await
    }

    /// Runs one migration.
    ///
    /// Each stage is announced to `sink` before it starts. The run ends with
    /// exactly one terminal update: `Done`, or `Error` carrying the failure
    /// message verbatim.
    pub async fn run<S: ProgressSink + ?Sized>(
        &self,
        request: &MigrationRequest,
        sink: &S,
    ) -> MigrationResult {
        info!(
            source = %request.source(),
            destination = request.destination_location_id(),
            policy = ?self.policy,
            "Starting migration"
        );

        match self.execute(request, sink).await {
            Ok(migrated) => {
                info!(new_entity_id = %migrated.new_entity_id, "Migration complete");
                sink.send(ProgressUpdate::entering(MigrationStage::Done));
                Ok(migrated)
            }
            Err(e) => Err(report_failure(e, sink)),
        }
    }

    async fn execute<S: ProgressSink + ?Sized>(
        &self,
        request: &MigrationRequest,
        sink: &S,
    ) -> MigrationResult {
        self.enter(MigrationStage::ResolvingCredential, sink)?;
        let resolved = self
            .resolver
            .resolve(request.credential_override(), &self.snapshot)
            .ok_or(MigrationError::CredentialNotFound)?;
        debug!(source = %resolved.source, credential = %resolved.credential.masked(), "Using credential");

        self.enter(MigrationStage::Fetching, sink)?;
        let fetched = self
            .guard(self.fetcher.fetch_resource(request.source(), &resolved.credential))
            .await??;

        self.enter(MigrationStage::Normalizing, sink)?;
        let payload = RawPayload::from_value(fetched.payload);
        let document = self.guard(self.normalizer.normalize(payload)).await?;

        let destination = request.destination_location_id();
        self.enter(MigrationStage::CreatingDestination, sink)?;
        let new_entity_id = self.guard(self.writer.create_entity(destination)).await??;

        self.enter(MigrationStage::WritingData, sink)
            .map_err(|e| e.with_created(&new_entity_id))?;
        let target = self.policy.target(request.source().kind());
        self.guard(
            self.writer
                .write_data(destination, &new_entity_id, &document, target),
        )
        .await
        .map_err(|e| e.with_created(&new_entity_id))??;

        Ok(Migrated {
            new_entity_id,
            source_url: fetched.attempt.url,
        })
    }

    fn enter<S: ProgressSink + ?Sized>(
        &self,
        stage: MigrationStage,
        sink: &S,
    ) -> Result<(), MigrationError> {
        if self.cancel.is_cancelled() {
            return Err(MigrationError::Cancelled { created: None });
        }
        debug!(stage = %stage, "Entering stage");
        sink.send(ProgressUpdate::entering(stage));
        Ok(())
    }

    async fn guard<F: Future>(&self, step: F) -> Result<F::Output, MigrationError> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(MigrationError::Cancelled { created: None }),
            output = step => Ok(output),
        }
    }
}

fn report_failure<S: ProgressSink + ?Sized>(err: MigrationError, sink: &S) -> MigrationError {
    if err.leaves_orphan() {
        warn!(error = %err, "Migration failed after the staging entity was created");
    } else {
        warn!(error = %err, "Migration failed");
    }
    sink.send(ProgressUpdate::failed(err.to_string()));
    err
}
