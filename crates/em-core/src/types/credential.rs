//! Opaque bearer credentials.

use std::fmt;

/// Prefix shared by base64url-encoded JSON token headers (`{"` encodes to `eyJ`).
pub const STRUCTURED_TOKEN_MARKER: &str = "eyJ";

/// Number of leading characters kept by [`Credential::masked`].
const MASK_VISIBLE_CHARS: usize = 20;

/// A bearer credential for the production API.
///
/// The value is never interpreted beyond [`looks_like_token`](Self::looks_like_token).
/// `Debug` prints only a masked prefix so credentials do not leak into logs.
///
/// # Examples
///
/// ```
/// use em_core::Credential;
///
/// let credential = Credential::new("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxIn0.c2ln").unwrap();
/// assert!(credential.looks_like_token());
/// assert!(Credential::new("   ").is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a credential value. Blank values are treated as absent.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// The raw value, for use in request headers.
    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the value contains the structured-token marker or the
    /// substring `token`.
    #[must_use]
    pub fn looks_like_token(&self) -> bool {
        looks_like_token(&self.0)
    }

    /// Returns the first few characters followed by `...`.
    #[must_use]
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(MASK_VISIBLE_CHARS).collect();
        format!("{prefix}...")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

/// The loose "looks like a token" heuristic applied to stored values.
#[inline]
#[must_use]
pub fn looks_like_token(value: &str) -> bool {
    value.contains(STRUCTURED_TOKEN_MARKER) || value.contains("token")
}
