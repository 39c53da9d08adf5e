//! Staging request and response bodies.

use em_core::{CanonicalDocument, DestinationConfig, EntityId, ResourceKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /emails/builder`.
///
/// Always asks for a blank, non plain-text template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody<'a> {
    /// Destination location.
    pub location_id: &'a str,
    /// Always `"blank"`.
    #[serde(rename = "type")]
    pub template_type: &'static str,
    /// Recorded author.
    pub updated_by: &'a str,
    /// Title of the new template.
    pub title: &'a str,
    /// Always `false`.
    pub is_plain_text: bool,
}

impl<'a> CreateBody<'a> {
    /// Builds the create body for `location_id`.
    #[must_use]
    pub fn new(location_id: &'a str, config: &'a DestinationConfig) -> Self {
        Self {
            location_id,
            template_type: "blank",
            updated_by: &config.updated_by,
            title: &config.title,
            is_plain_text: false,
        }
    }
}

/// The part of the create response carrying the new id.
///
/// Ids arrive as strings or as numbers depending on the deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateResponse {
    /// New entity id.
    #[serde(default)]
    pub id: Option<Value>,
    /// Fallback id some deployments return instead of `id`.
    #[serde(default)]
    pub redirect: Option<Value>,
}

impl CreateResponse {
    /// The new entity id: `id`, else `redirect`. Empty strings and values
    /// that are neither strings nor numbers count as absent.
    #[must_use]
    pub fn into_entity_id(self) -> Option<EntityId> {
        self.id
            .and_then(id_text)
            .or_else(|| self.redirect.and_then(id_text))
            .map(EntityId::new)
    }
}

fn id_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Which id key the write body carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
enum EntityRef<'a> {
    TemplateId(&'a str),
    CampaignId(&'a str),
}

/// Body of the data write for either destination shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteBody<'a> {
    location_id: &'a str,
    #[serde(flatten)]
    entity: EntityRef<'a>,
    updated_by: &'a str,
    dnd: &'a Value,
    html: &'a str,
    editor_type: &'static str,
}

impl<'a> WriteBody<'a> {
    /// Builds the write body. `target` picks `templateId` or `campaignId`.
    #[must_use]
    pub fn new(
        location_id: &'a str,
        entity_id: &'a EntityId,
        document: &'a CanonicalDocument,
        target: ResourceKind,
        config: &'a DestinationConfig,
    ) -> Self {
        let entity = match target {
            ResourceKind::Template => EntityRef::TemplateId(entity_id.as_str()),
            ResourceKind::Campaign => EntityRef::CampaignId(entity_id.as_str()),
        };
        Self {
            location_id,
            entity,
            updated_by: &config.updated_by,
            dnd: &document.design_data,
            html: &document.html_content,
            editor_type: "builder",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body() {
        let config = DestinationConfig::default();
        insta::assert_json_snapshot!(CreateBody::new("stg-loc", &config), @r#"
        {
          "locationId": "stg-loc",
          "type": "blank",
          "updatedBy": "7Xw0wYJ99ufWXkfSrEQ0",
          "title": "Migrated Template",
          "isPlainText": false
        }
        "#);
    }

    #[test]
    fn test_template_write_body() {
        let config = DestinationConfig::default();
        let id = EntityId::new("new-1");
        let document = CanonicalDocument::new(json!({ "elements": [] }), "<p>hi</p>");
        let body = serde_json::to_value(WriteBody::new(
            "stg-loc",
            &id,
            &document,
            ResourceKind::Template,
            &config,
        ))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "locationId": "stg-loc",
                "templateId": "new-1",
                "updatedBy": "7Xw0wYJ99ufWXkfSrEQ0",
                "dnd": { "elements": [] },
                "html": "<p>hi</p>",
                "editorType": "builder",
            })
        );
    }

    #[test]
    fn test_campaign_write_body_uses_campaign_id() {
        let config = DestinationConfig::default();
        let id = EntityId::new("new-2");
        let document = CanonicalDocument::empty();
        let body = serde_json::to_value(WriteBody::new(
            "stg-loc",
            &id,
            &document,
            ResourceKind::Campaign,
            &config,
        ))
        .unwrap();

        assert_eq!(body["campaignId"], "new-2");
        assert!(body.get("templateId").is_none());
        assert_eq!(body["dnd"], CanonicalDocument::empty_design());
    }

    #[test]
    fn test_create_response_prefers_id() {
        let response: CreateResponse =
            serde_json::from_value(json!({ "id": "a", "redirect": "b" })).unwrap();
        assert_eq!(response.into_entity_id(), Some(EntityId::new("a")));
    }

    #[test]
    fn test_create_response_falls_back_to_redirect() {
        for body in [json!({ "redirect": "b" }), json!({ "id": "", "redirect": "b" })] {
            let response: CreateResponse = serde_json::from_value(body).unwrap();
            assert_eq!(response.into_entity_id(), Some(EntityId::new("b")));
        }
    }

    #[test]
    fn test_create_response_numeric_id() {
        let response: CreateResponse = serde_json::from_value(json!({ "id": 12345 })).unwrap();
        assert_eq!(response.into_entity_id(), Some(EntityId::new("12345")));

        let response: CreateResponse =
            serde_json::from_value(json!({ "id": null, "redirect": 67 })).unwrap();
        assert_eq!(response.into_entity_id(), Some(EntityId::new("67")));
    }

    #[test]
    fn test_create_response_ignores_non_scalar_id() {
        let response: CreateResponse =
            serde_json::from_value(json!({ "id": { "value": "a" }, "redirect": "b" })).unwrap();
        assert_eq!(response.into_entity_id(), Some(EntityId::new("b")));
    }

    #[test]
    fn test_create_response_without_id() {
        let response: CreateResponse = serde_json::from_value(json!({ "ok": true })).unwrap();
        assert_eq!(response.into_entity_id(), None);
    }
}
