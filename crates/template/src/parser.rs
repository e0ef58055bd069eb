//! Template JSON parsing

use crate::{ContentType, Result, Template, TemplateError};

/// Parse a template from JSON string
pub fn parse_template(json: &str) -> Result<Template> {
    serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))
}

/// Parse the content-type lookup list (`[{ "id": ..., "label": ... }]`)
///
/// Numeric identifiers are accepted and converted to strings.
pub fn parse_content_types(json: &str) -> Result<Vec<ContentType>> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))?;

    let items = value
        .as_array()
        .ok_or_else(|| TemplateError::ParseError("content types must be an array".to_string()))?;

    items
        .iter()
        .map(|item| {
            let id = match item.get("id") {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(TemplateError::ParseError(format!(
                        "content type without id: {}",
                        item
                    )))
                }
            };
            let label = item
                .get("label")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            Ok(ContentType { id, label })
        })
        .collect()
}
