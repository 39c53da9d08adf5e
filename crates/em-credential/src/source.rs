//! Credential sources and the matching rules each one applies.

use std::fmt;
use std::sync::LazyLock;

use em_core::Credential;
use em_core::types::credential::{STRUCTURED_TOKEN_MARKER, looks_like_token};
use regex::Regex;
use serde_json::Value;

use crate::snapshot::StorageSnapshot;

/// Three dot-separated base64url segments, the first starting with the
/// structured-token marker.
#[allow(clippy::expect_used)]
static STRUCTURED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+")
        .expect("structured token pattern is a valid regex")
});

/// Where a credential may come from.
///
/// Each variant is a pure function over a [`StorageSnapshot`]; see
/// [`probe`](Self::probe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// A value supplied by the caller, used verbatim.
    Override(String),

    /// A single named storage slot.
    NamedSlot(String),

    /// Every entry in storage.
    FullScan,
}

impl CredentialSource {
    /// Applies this source's matching rule to `snapshot`.
    ///
    /// - `Override`: the value itself, unless blank.
    /// - `NamedSlot`: the slot value if it contains `eyJ` or `token`.
    /// - `FullScan`: the first entry containing `eyJ` that either is a JSON
    ///   container with a non-empty string `value` field (which is returned),
    ///   or is not JSON but contains a three-segment token (returned whole).
    ///   JSON entries without a usable `value` are skipped.
    #[must_use]
    pub fn probe(&self, snapshot: &StorageSnapshot) -> Option<Credential> {
        match self {
            Self::Override(value) => Credential::new(value.as_str()),
            Self::NamedSlot(name) => snapshot
                .get(name)
                .filter(|value| looks_like_token(value))
                .and_then(Credential::new),
            Self::FullScan => snapshot
                .entries()
                .find_map(|(_, value)| scan_entry(value))
                .and_then(Credential::new),
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override(_) => f.write_str("explicit override"),
            Self::NamedSlot(name) => write!(f, "storage slot '{name}'"),
            Self::FullScan => f.write_str("full storage scan"),
        }
    }
}

fn scan_entry(value: &str) -> Option<String> {
    if !value.contains(STRUCTURED_TOKEN_MARKER) {
        return None;
    }

    match serde_json::from_str::<Value>(value) {
        Ok(container) => container
            .get("value")
            .and_then(Value::as_str)
            .filter(|inner| !inner.is_empty())
            .map(str::to_owned),
        Err(_) => STRUCTURED_TOKEN
            .is_match(value)
            .then(|| value.to_owned()),
    }
}
