//! CLI entry point for the em-migration tool.
//!
//! This binary copies an email builder template or campaign from the
//! production API into a freshly created template in staging.
//!
//! # Usage
//!
//! ```bash
//! em-migrate [OPTIONS] <COMMAND>
//!
//! # Migrate by ids
//! em-migrate migrate --location prod-loc --entity tpl-1 --to staging-loc --token eyJ...
//!
//! # Migrate from an editor link, credential found in a storage dump
//! em-migrate migrate --url 'https://app.gohighlevel.com/location/prod-loc/emails/create/tpl-1/builder' \
//!     --to staging-loc --storage local-storage.json
//!
//! # Show the production endpoint chain for a resource
//! em-migrate endpoints --location prod-loc --entity cmp-1 --kind campaign
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use em_core::{Config, ResourceDescriptor, ResourceKind, SourceLink};
use em_credential::{CredentialResolver, StorageSnapshot};
use em_pipeline::{DestinationPolicy, Migrator, ProgressUpdate};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Copies email builder templates and campaigns from production to staging.
#[derive(Parser)]
#[command(name = "em-migrate", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file. Missing fields use built-in defaults.
    #[arg(short, long, global = true, env = "EM_MIGRATE_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Migrate one resource into a new staging template.
    Migrate(MigrateArgs),

    /// Print the production read attempts and staging write URLs.
    Endpoints {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Report which credential source would be used.
    Token(CredentialArgs),

    /// Print the effective configuration as JSON.
    Config,
}

/// Identifies the production resource, by ids or by editor link.
#[derive(Args)]
struct SourceArgs {
    /// Production editor URL to take location, id, and kind from.
    #[arg(long, conflicts_with_all = ["location", "entity", "kind"])]
    url: Option<String>,

    /// Production location id.
    #[arg(short, long, required_unless_present = "url")]
    location: Option<String>,

    /// Production template or campaign id.
    #[arg(short, long, required_unless_present = "url")]
    entity: Option<String>,

    /// Resource kind: `template` or `campaign`.
    #[arg(short, long, default_value = "template")]
    kind: String,
}

/// Where the credential comes from.
#[derive(Args)]
struct CredentialArgs {
    /// Credential to use verbatim. Skips storage lookup.
    #[arg(long, env = "EM_MIGRATE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// JSON object of browser storage entries to search for a credential.
    #[arg(long)]
    storage: Option<Utf8PathBuf>,
}

/// Arguments of the `migrate` command.
#[derive(Args)]
struct MigrateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Staging location receiving the new template.
    #[arg(short, long = "to")]
    destination: String,

    #[command(flatten)]
    credential: CredentialArgs,

    /// Write campaigns through the campaign data endpoint instead of as
    /// templates.
    #[arg(long)]
    follow_source_kind: bool,

    /// Print the outcome as JSON on stdout.
    #[arg(long)]
    json: bool,
}

/// A production resource named on the command line. The kind stays a string
/// until the pipeline parses it.
struct SourceSpec {
    location_id: String,
    entity_id: String,
    kind: String,
}

impl SourceArgs {
    fn resolve(&self) -> color_eyre::Result<SourceSpec> {
        if let Some(url) = &self.url {
            let link = SourceLink::parse(url)
                .ok_or_else(|| eyre!("Could not find a location and resource id in {url}"))?;
            return Ok(SourceSpec {
                location_id: link.location_id,
                entity_id: link.entity_id,
                kind: link.kind.as_str().to_owned(),
            });
        }

        match (&self.location, &self.entity) {
            (Some(location), Some(entity)) => Ok(SourceSpec {
                location_id: location.clone(),
                entity_id: entity.clone(),
                kind: self.kind.clone(),
            }),
            _ => Err(eyre!("--location and --entity are required without --url")),
        }
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// HTTP client internals are filtered to `warn` level.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!(
            "{level},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"
        ))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Loads the configuration file if one was given, else the defaults.
fn load_config(cli: &Cli) -> color_eyre::Result<Config> {
    match &cli.config {
        Some(path) => {
            debug!(path = %path, "Loading configuration");
            Config::load(path).wrap_err_with(|| format!("Failed to load configuration from {path}"))
        }
        None => Ok(Config::default()),
    }
}

fn load_snapshot(path: Option<&Utf8PathBuf>) -> color_eyre::Result<StorageSnapshot> {
    let Some(path) = path else {
        return Ok(StorageSnapshot::new());
    };
    let snapshot = StorageSnapshot::load(path)?;
    debug!(path = %path, entries = snapshot.len(), "Loaded storage snapshot");
    Ok(snapshot)
}

/// Cancels `token` on Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C, cancelling migration");
            token.cancel();
        }
    });
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs one migration, streaming progress to stderr.
async fn run_migrate(config: &Config, args: &MigrateArgs) -> color_eyre::Result<()> {
    let source = args.source.resolve()?;
    let snapshot = load_snapshot(args.credential.storage.as_ref())?;
    let policy = if args.follow_source_kind {
        DestinationPolicy::FollowSourceKind
    } else {
        DestinationPolicy::AlwaysTemplate
    };

    let token = CancellationToken::new();
    cancel_on_ctrl_c(token.clone());

    let migrator = Migrator::from_config(config)?
        .with_snapshot(snapshot)
        .with_policy(policy)
        .with_cancellation(token);

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_progress(rx));

    let result = migrator
        .start_migration(
            &source.location_id,
            &source.entity_id,
            &args.destination,
            &source.kind,
            args.credential.token.as_deref(),
            &tx,
        )
        .await;

    drop(tx);
    let _ = printer.await;

    if args.json {
        let outcome = em_pipeline::outcome(&result);
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", serde_json::to_string_pretty(&outcome)?)?;
        return result.map(|_| ()).map_err(Into::into);
    }

    let migrated = result?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "New template id: {}", migrated.new_entity_id)?;
    writeln!(handle, "Read from:       {}", migrated.source_url)?;
    Ok(())
}

/// Prints the endpoint chain for a resource.
fn run_endpoints(config: &Config, args: &SourceArgs) -> color_eyre::Result<()> {
    let source = args.resolve()?;
    let kind: ResourceKind = source.kind.parse()?;
    let descriptor = ResourceDescriptor::new(source.location_id, source.entity_id, kind);
    let migrator = Migrator::from_config(config)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "Production reads for {descriptor}:")?;
    for (n, attempt) in migrator.fetcher().endpoints().attempts(&descriptor).enumerate() {
        writeln!(handle, "  {:>2}. [{:<9}] {}", n + 1, attempt.profile, attempt.url)?;
    }

    let writer = migrator.writer();
    let target = DestinationPolicy::default().target(kind);
    writeln!(handle)?;
    writeln!(handle, "Staging writes:")?;
    writeln!(handle, "  create  {}", writer.create_url())?;
    writeln!(handle, "  data    {} ({target})", writer.data_url(target))?;
    Ok(())
}

/// Reports the credential source that would be used, with the value masked.
fn run_token(config: &Config, args: &CredentialArgs) -> color_eyre::Result<()> {
    let snapshot = load_snapshot(args.storage.as_ref())?;
    let resolver = CredentialResolver::new(&config.credential);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let plan = resolver.plan(args.token.as_deref());
    writeln!(handle, "Sources tried, in order:")?;
    for source in &plan {
        writeln!(handle, "  - {source}")?;
    }

    let resolved = resolver
        .resolve(args.token.as_deref(), &snapshot)
        .ok_or_else(|| eyre!("Authentication token is required for API calls"))?;
    writeln!(handle)?;
    writeln!(handle, "Found via {}: {}", resolved.source, resolved.credential.masked())?;
    Ok(())
}

/// Prints the effective configuration.
fn run_config(config: &Config) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", serde_json::to_string_pretty(config)?)?;
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Writes each progress update to stderr until the sender is dropped.
async fn print_progress(mut rx: mpsc::UnboundedReceiver<ProgressUpdate>) {
    while let Some(update) = rx.recv().await {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle, "[{}] {}", update.stage, update.message);
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Load configuration
    let config = load_config(&cli)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Migrate(args) => run_migrate(&config, args).await,
        Commands::Endpoints { source } => run_endpoints(&config, source),
        Commands::Token(args) => run_token(&config, args),
        Commands::Config => run_config(&config),
    }
}
