//! Placed text elements

use serde::{Deserialize, Serialize};
use template::TemplateElement;

use crate::geometry::Point;

/// Session-local element identifier
pub type ElementId = u64;

/// One placed text item on the canvas
///
/// `temp_id` is assigned by the store and identifies the element for the
/// whole editing session. `id` is only present for elements loaded from a
/// persisted template and is dropped on save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub temp_id: ElementId,
    pub x: f64,
    pub y: f64,
    pub text_content: String,
    pub is_dynamic: bool,
    pub font_size: u32,
    #[serde(default)]
    pub selected: bool,
}

impl Element {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Structural equality ignoring the transient selection flag
    pub fn same_content(&self, other: &Element) -> bool {
        self.id == other.id
            && self.temp_id == other.temp_id
            && self.x == other.x
            && self.y == other.y
            && self.text_content == other.text_content
            && self.is_dynamic == other.is_dynamic
            && self.font_size == other.font_size
    }

    /// Contract form without any identity
    pub fn to_template_element(&self) -> TemplateElement {
        TemplateElement {
            id: None,
            x: self.x,
            y: self.y,
            text_content: self.text_content.clone(),
            is_dynamic: self.is_dynamic,
            font_size: self.font_size,
        }
    }

    /// Hydrate from a loaded template element with a fresh session id
    pub(crate) fn from_template_element(source: &TemplateElement, temp_id: ElementId) -> Self {
        Self {
            id: source.id.clone(),
            temp_id,
            x: source.x,
            y: source.y,
            text_content: source.text_content.clone(),
            is_dynamic: source.is_dynamic,
            font_size: source.font_size,
            selected: false,
        }
    }
}

/// Defaults for a newly added element
///
/// Unset fields fall back to the store's configuration: font size to the
/// default font size and position to the next auto-stacked slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewElement {
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub is_dynamic: bool,
    #[serde(default)]
    pub font_size: Option<u32>,
    #[serde(default)]
    pub position: Option<Point>,
}

impl NewElement {
    /// Static text element
    pub fn static_text(text: &str) -> Self {
        Self {
            text_content: text.to_string(),
            ..Self::default()
        }
    }

    /// Dynamic element bound to a dot-path expression
    pub fn dynamic_field(path: &str) -> Self {
        Self {
            text_content: path.to_string(),
            is_dynamic: true,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element() -> Element {
        Element {
            id: Some("9".to_string()),
            temp_id: 1,
            x: 10.0,
            y: 20.0,
            text_content: "user.email".to_string(),
            is_dynamic: true,
            font_size: 12,
            selected: true,
        }
    }

    #[test]
    fn test_same_content_ignores_selection() {
        let a = element();
        let mut b = a.clone();
        b.selected = false;
        assert!(a.same_content(&b));
        b.x += 1.0;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_template_element_strips_identity() {
        let converted = element().to_template_element();
        assert_eq!(converted.id, None);
        assert_eq!(converted.text_content, "user.email");
        assert!(converted.is_dynamic);
    }

    #[test]
    fn test_new_element_builders() {
        let new = NewElement::dynamic_field("case.id").at(5.0, 6.0).with_font_size(9);
        assert!(new.is_dynamic);
        assert_eq!(new.position, Some(Point::new(5.0, 6.0)));
        assert_eq!(new.font_size, Some(9));
    }
}
