//! Buffered HTTP responses.

use serde::de::DeserializeOwned;

/// A fully buffered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Canonical reason phrase for the status, or `""` if it has none.
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("")
    }

    /// Parses the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_is_success_bounds() {
        assert!(HttpResponse::new("u", 200, "").is_success());
        assert!(HttpResponse::new("u", 204, "").is_success());
        assert!(!HttpResponse::new("u", 199, "").is_success());
        assert!(!HttpResponse::new("u", 301, "").is_success());
        assert!(!HttpResponse::new("u", 500, "").is_success());
    }

    #[test]
    fn test_status_text() {
        assert_eq!(HttpResponse::new("u", 500, "").status_text(), "Internal Server Error");
        assert_eq!(HttpResponse::new("u", 404, "").status_text(), "Not Found");
        assert_eq!(HttpResponse::new("u", 599, "").status_text(), "");
    }

    #[test]
    fn test_json_parsing() {
        let response = HttpResponse::new("u", 200, r#"{"id":"x"}"#);
        let value: Value = response.json().unwrap();
        assert_eq!(value["id"], "x");

        let response = HttpResponse::new("u", 200, "<html>");
        assert!(response.json::<Value>().is_err());
    }
}
