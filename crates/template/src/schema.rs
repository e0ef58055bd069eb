//! Template JSON schema types

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TemplateError;

/// Embedded JSON Schema for the template description
/// This schema can be used by the persistence layer to validate saved templates
pub const TEMPLATE_SCHEMA: &str = include_str!("../data/template-schema.json");

/// Default font size in points for new text elements
pub const DEFAULT_FONT_SIZE: u32 = 12;

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

/// Size specification in points
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Supported page sizes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PageSize {
    #[default]
    #[serde(rename = "A4")]
    A4,
    #[serde(rename = "letter")]
    Letter,
}

impl PageSize {
    /// Page dimensions in points
    ///
    /// A4 is 595×842 and US letter is 612×792.
    pub fn dimensions(self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.0, 842.0),
            PageSize::Letter => Size::new(612.0, 792.0),
        }
    }

    /// Identifier used in the template JSON
    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageSize {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A4" | "a4" => Ok(PageSize::A4),
            "letter" | "Letter" => Ok(PageSize::Letter),
            other => Err(TemplateError::ParseError(format!(
                "unknown page size '{}'",
                other
            ))),
        }
    }
}

/// Content-type descriptor from the external metadata lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentType {
    /// Content type identifier
    pub id: String,

    /// Display label
    pub label: String,
}

impl ContentType {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One `{field, value}` pair of the query filter list
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryFilter {
    pub field: String,
    pub value: String,
}

impl QueryFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Serialize a filter list into the key→value map form
///
/// Later pairs overwrite earlier ones with the same field. Pairs whose field
/// is blank are not serialized.
pub fn filters_to_map(filters: &[QueryFilter]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for filter in filters {
        if filter.field.trim().is_empty() {
            continue;
        }
        map.insert(filter.field.clone(), filter.value.clone());
    }
    map
}

/// Expand a key→value map back into an ordered filter list
pub fn map_to_filters(map: &BTreeMap<String, String>) -> Vec<QueryFilter> {
    map.iter()
        .map(|(field, value)| QueryFilter::new(field.clone(), value.clone()))
        .collect()
}

/// Placed text element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateElement {
    /// Persistence identifier (assigned by the backend, never sent on save)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// X coordinate in points
    pub x: f64,

    /// Y coordinate in points (from top)
    pub y: f64,

    /// Literal text, or a dot-path expression when dynamic
    #[serde(rename = "textContent")]
    #[serde(default)]
    pub text_content: String,

    /// Whether `text_content` is a field-path expression
    #[serde(rename = "isDynamic")]
    #[serde(default)]
    pub is_dynamic: bool,

    /// Font size in points
    #[serde(rename = "fontSize")]
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl TemplateElement {
    /// Static text element
    pub fn text(text: &str, x: f64, y: f64, font_size: u32) -> Self {
        Self {
            id: None,
            x,
            y,
            text_content: text.to_string(),
            is_dynamic: false,
            font_size,
        }
    }

    /// Dynamic element bound to a dot-path expression
    pub fn binding(path: &str, x: f64, y: f64, font_size: u32) -> Self {
        Self {
            is_dynamic: true,
            ..Self::text(path, x, y, font_size)
        }
    }
}

/// Root template description
///
/// This is both the document accepted on load and the payload emitted on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Template {
    /// Template display name
    #[serde(default)]
    pub name: String,

    /// Template code
    #[serde(default)]
    pub code: String,

    /// Page size
    #[serde(rename = "pageSize")]
    #[serde(default)]
    pub page_size: PageSize,

    /// Referenced content type (data model descriptor)
    #[serde(rename = "contentType")]
    #[serde(default)]
    pub content_type: Option<String>,

    /// Query filters as a field → value map
    #[serde(rename = "queryFilters")]
    #[serde(default)]
    pub query_filters: BTreeMap<String, String>,

    /// Placed text elements in rendering order
    #[serde(default)]
    pub elements: Vec<TemplateElement>,
}

impl Template {
    /// Create an empty template with a name and code
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            ..Self::default()
        }
    }

    /// Set the page size
    pub fn set_page_size(&mut self, page_size: PageSize) -> &mut Self {
        self.page_size = page_size;
        self
    }

    /// Set the content type and reset its query filters
    pub fn set_content_type(&mut self, content_type: Option<&str>) -> &mut Self {
        self.content_type = content_type.map(str::to_string);
        self.query_filters.clear();
        self
    }

    /// Add a query filter
    pub fn insert_filter(&mut self, field: &str, value: &str) -> &mut Self {
        self.query_filters
            .insert(field.to_string(), value.to_string());
        self
    }

    /// Insert static text at position
    pub fn insert_text(&mut self, text: &str, x: f64, y: f64, font_size: u32) -> &mut Self {
        self.elements
            .push(TemplateElement::text(text, x, y, font_size));
        self
    }

    /// Insert a dynamic field expression at position
    pub fn insert_binding(&mut self, path: &str, x: f64, y: f64, font_size: u32) -> &mut Self {
        self.elements
            .push(TemplateElement::binding(path, x, y, font_size));
        self
    }

    /// Page dimensions for the configured page size
    pub fn page_dimensions(&self) -> Size {
        self.page_size.dimensions()
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
