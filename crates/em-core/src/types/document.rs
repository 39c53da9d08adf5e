//! Raw production payloads and the canonical document.
//!
//! The production API answers with one of several shapes. [`RawPayload`]
//! classifies a response body once, at ingestion; normalization then works on
//! the variant instead of probing fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A production response body, classified by shape.
///
/// # Examples
///
/// ```
/// use em_core::RawPayload;
/// use serde_json::json;
///
/// let payload = RawPayload::from_value(json!({ "dnd": { "elements": [] }, "html": "<p/>" }));
/// assert_eq!(payload.shape(), "dnd");
///
/// let payload = RawPayload::from_value(json!({ "name": "nothing useful" }));
/// assert_eq!(payload, RawPayload::Unknown);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// Newer builder responses: design in `editorData`, rendered html behind
    /// an optional `previewUrl`.
    EditorData {
        /// The builder design document.
        editor_data: Value,
        /// Location of the rendered html, if the response carried one.
        preview_url: Option<String>,
    },

    /// Older responses carrying the design in `dnd` and inline `html`.
    Dnd {
        /// The builder design document.
        dnd: Value,
        /// Inline rendered html.
        html: Option<String>,
    },

    /// Neither shape was recognised.
    Unknown,
}

impl RawPayload {
    /// Classifies a response body.
    ///
    /// `editorData` wins over `dnd` when both are present. A field holding
    /// `null`, `false`, zero, or `""` counts as absent, as does an empty
    /// `previewUrl`.
    #[must_use]
    pub fn from_value(mut value: Value) -> Self {
        let Some(object) = value.as_object_mut() else {
            return Self::Unknown;
        };

        if let Some(editor_data) = take_present(object, "editorData") {
            let preview_url = take_non_empty_string(object, "previewUrl");
            return Self::EditorData {
                editor_data,
                preview_url,
            };
        }

        if let Some(dnd) = take_present(object, "dnd") {
            let html = take_non_empty_string(object, "html");
            return Self::Dnd { dnd, html };
        }

        Self::Unknown
    }

    /// Short label of the detected shape, for logs.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::EditorData { .. } => "editorData",
            Self::Dnd { .. } => "dnd",
            Self::Unknown => "unknown",
        }
    }
}

fn take_present(object: &mut Map<String, Value>, key: &str) -> Option<Value> {
    object.remove(key).filter(is_truthy)
}

/// `null`, `false`, zero, and `""` count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn take_non_empty_string(object: &mut Map<String, Value>, key: &str) -> Option<String> {
    match object.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// The normalized form written to the destination.
///
/// `design_data` is never null: documents without a design carry the
/// [`empty design`](Self::empty_design) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalDocument {
    /// The builder design document.
    pub design_data: Value,

    /// Rendered html; empty when unavailable.
    pub html_content: String,
}

impl CanonicalDocument {
    /// Creates a document, substituting the empty design for `null`.
    #[must_use]
    pub fn new(design_data: Value, html_content: impl Into<String>) -> Self {
        let design_data = if design_data.is_null() {
            Self::empty_design()
        } else {
            design_data
        };
        Self {
            design_data,
            html_content: html_content.into(),
        }
    }

    /// A document with the empty design and no html.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            design_data: Self::empty_design(),
            html_content: String::new(),
        }
    }

    /// The empty-design sentinel `{ elements: [], attrs: {}, templateSettings: {} }`.
    #[must_use]
    pub fn empty_design() -> Value {
        serde_json::json!({
            "elements": [],
            "attrs": {},
            "templateSettings": {},
        })
    }

    /// Returns `true` if this document carries the empty design.
    #[must_use]
    pub fn has_empty_design(&self) -> bool {
        self.design_data == Self::empty_design()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_editor_data_shape() {
        let payload = RawPayload::from_value(json!({
            "editorData": { "elements": [1] },
            "previewUrl": "https://cdn/preview.html",
        }));
        assert_eq!(
            payload,
            RawPayload::EditorData {
                editor_data: json!({ "elements": [1] }),
                preview_url: Some("https://cdn/preview.html".to_owned()),
            }
        );
    }

    #[test]
    fn test_editor_data_takes_precedence_over_dnd() {
        let payload = RawPayload::from_value(json!({
            "editorData": { "from": "editor" },
            "dnd": { "from": "dnd" },
            "html": "<p>dnd</p>",
        }));
        assert_eq!(payload.shape(), "editorData");
    }

    #[test]
    fn test_null_editor_data_falls_through_to_dnd() {
        let payload = RawPayload::from_value(json!({
            "editorData": null,
            "dnd": { "elements": [] },
        }));
        assert_eq!(
            payload,
            RawPayload::Dnd {
                dnd: json!({ "elements": [] }),
                html: None,
            }
        );
    }

    #[test]
    fn test_falsy_editor_data_falls_through_to_dnd() {
        for falsy in [json!(""), json!(false), json!(0), json!(0.0)] {
            let payload = RawPayload::from_value(json!({
                "editorData": falsy,
                "dnd": { "a": 1 },
                "html": "<p/>",
            }));
            assert_eq!(
                payload,
                RawPayload::Dnd {
                    dnd: json!({ "a": 1 }),
                    html: Some("<p/>".to_owned()),
                }
            );
        }
    }

    #[test]
    fn test_falsy_dnd_is_unknown() {
        for falsy in [json!(""), json!(false), json!(0)] {
            let payload = RawPayload::from_value(json!({ "editorData": null, "dnd": falsy }));
            assert_eq!(payload, RawPayload::Unknown);
        }
    }

    #[test]
    fn test_empty_preview_url_is_absent() {
        let payload = RawPayload::from_value(json!({ "editorData": {}, "previewUrl": "" }));
        assert!(matches!(
            payload,
            RawPayload::EditorData {
                preview_url: None,
                ..
            }
        ));
    }

    #[test]
    fn test_non_object_is_unknown() {
        assert_eq!(RawPayload::from_value(json!([1, 2])), RawPayload::Unknown);
        assert_eq!(RawPayload::from_value(Value::Null), RawPayload::Unknown);
    }

    #[test]
    fn test_document_null_design_becomes_sentinel() {
        let document = CanonicalDocument::new(Value::Null, "");
        assert!(document.has_empty_design());
        assert_eq!(document, CanonicalDocument::empty());
    }

    #[test]
    fn test_document_serializes_camel_case() {
        insta::assert_json_snapshot!(CanonicalDocument::new(json!({ "k": 1 }), "<b>hi</b>"), @r#"
        {
          "designData": {
            "k": 1
          },
          "htmlContent": "<b>hi</b>"
        }
        "#);
    }
}
