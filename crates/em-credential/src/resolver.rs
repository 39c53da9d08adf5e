//! Ordered credential resolution.

use em_core::{Credential, CredentialConfig};
use tracing::{debug, info};

use crate::snapshot::StorageSnapshot;
use crate::source::CredentialSource;

/// A credential together with the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    /// The credential.
    pub credential: Credential,
    /// Where it was found.
    pub source: CredentialSource,
}

/// Tries credential sources in order and returns the first match.
///
/// The plan is: the override (if any), then each configured slot, then the
/// full scan. A non-blank override short-circuits the plan entirely, so the
/// snapshot is never consulted.
///
/// # Examples
///
/// ```
/// use em_credential::{CredentialResolver, StorageSnapshot};
///
/// let resolver = CredentialResolver::default();
/// let snapshot = StorageSnapshot::from_pairs([("token-id", "eyJ.stored")]);
///
/// let resolved = resolver.resolve(Some("manual-token"), &snapshot).unwrap();
/// assert_eq!(resolved.credential.expose(), "manual-token");
///
/// assert!(resolver.resolve(None, &StorageSnapshot::new()).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    slots: Vec<String>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(&CredentialConfig::default())
    }
}

impl CredentialResolver {
    /// Creates a resolver probing the configured slots.
    #[must_use]
    pub fn new(config: &CredentialConfig) -> Self {
        Self {
            slots: config.slots.clone(),
        }
    }

    /// The ordered list of sources that would be probed.
    #[must_use]
    pub fn plan(&self, override_value: Option<&str>) -> Vec<CredentialSource> {
        let mut plan = Vec::with_capacity(self.slots.len() + 2);
        if let Some(value) = override_value {
            plan.push(CredentialSource::Override(value.to_owned()));
        }
        plan.extend(self.slots.iter().cloned().map(CredentialSource::NamedSlot));
        plan.push(CredentialSource::FullScan);
        plan
    }

    /// Resolves a credential, or `None` if no source matches.
    #[must_use]
    pub fn resolve(
        &self,
        override_value: Option<&str>,
        snapshot: &StorageSnapshot,
    ) -> Option<ResolvedCredential> {
        for source in self.plan(override_value) {
            if let Some(credential) = source.probe(snapshot) {
                info!(%source, credential = %credential.masked(), "Found credential");
                return Some(ResolvedCredential { credential, source });
            }
            debug!(%source, "No credential");
        }

        None
    }
}
