//! Ordered request header lists.

use smallvec::SmallVec;

/// An ordered set of request headers.
///
/// Header names compare case-insensitively. Setting a header that is already
/// present replaces its value in place.
///
/// # Examples
///
/// ```
/// use em_http::HeaderProfile;
///
/// let headers = HeaderProfile::new()
///     .with("version", "2021-07-28")
///     .with("Content-Type", "application/json")
///     .with("content-type", "text/plain");
///
/// assert_eq!(headers.len(), 2);
/// assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderProfile {
    entries: SmallVec<[(String, String); 8]>,
}

impl HeaderProfile {
    /// Creates an empty profile.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header and returns the profile.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a header when `value` is `Some`.
    #[must_use]
    pub fn with_optional(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Sets a header, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a header value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of headers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no headers are set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let headers = HeaderProfile::new().with("b", "2").with("a", "1");
        let names: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_with_optional() {
        let headers = HeaderProfile::new()
            .with_optional("istio-workload-name", None::<String>)
            .with_optional("source", Some("WEB_USER"));
        assert_eq!(headers.len(), 1);
        assert!(headers.get("istio-workload-name").is_none());
    }

    #[test]
    fn test_empty_profile() {
        assert!(HeaderProfile::new().is_empty());
    }
}
