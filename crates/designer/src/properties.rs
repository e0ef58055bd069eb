//! Two-way binding between the selected element and the property form

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};

/// Values shown in the property panel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyForm {
    pub x: f64,
    pub y: f64,
    pub text_content: String,
    pub is_dynamic: bool,
    pub font_size: u32,
}

impl From<&Element> for PropertyForm {
    fn from(element: &Element) -> Self {
        Self {
            x: element.x,
            y: element.y,
            text_content: element.text_content.clone(),
            is_dynamic: element.is_dynamic,
            font_size: element.font_size,
        }
    }
}

/// A form change: only the edited fields are set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub is_dynamic: Option<bool>,
    #[serde(default)]
    pub font_size: Option<u32>,
}

impl PropertyPatch {
    /// Write the set fields onto an element; returns whether anything changed
    ///
    /// Toggling `is_dynamic` leaves `text_content` alone. Non-finite
    /// coordinates are ignored.
    pub fn apply_to(&self, element: &mut Element) -> bool {
        let mut changed = false;

        if let Some(x) = self.x.filter(|x| x.is_finite()) {
            changed |= element.x != x;
            element.x = x;
        }
        if let Some(y) = self.y.filter(|y| y.is_finite()) {
            changed |= element.y != y;
            element.y = y;
        }
        if let Some(text) = &self.text_content {
            changed |= element.text_content != *text;
            element.text_content.clone_from(text);
        }
        if let Some(is_dynamic) = self.is_dynamic {
            changed |= element.is_dynamic != is_dynamic;
            element.is_dynamic = is_dynamic;
        }
        if let Some(font_size) = self.font_size {
            changed |= element.font_size != font_size;
            element.font_size = font_size;
        }

        changed
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.text_content.is_none()
            && self.is_dynamic.is_none()
            && self.font_size.is_none()
    }
}

/// Property panel state
///
/// `sync` pushes the selection into the form silently. `apply` is the only
/// path that writes form values back, so a sync never turns into a write.
#[derive(Debug, Clone, Default)]
pub struct PropertiesBinding {
    bound: Option<ElementId>,
    form: Option<PropertyForm>,
}

impl PropertiesBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the form from the current selection without emitting a change
    pub fn sync(&mut self, selected: Option<&Element>) {
        self.bound = selected.map(|e| e.temp_id);
        self.form = selected.map(PropertyForm::from);
    }

    /// Write a form change onto the selected element
    ///
    /// Returns `true` when the element changed and history must be recorded.
    /// With nothing selected the edit is inert.
    pub fn apply(&mut self, selected: Option<&mut Element>, patch: &PropertyPatch) -> bool {
        let Some(element) = selected else {
            tracing::debug!("property edit ignored, nothing selected");
            return false;
        };

        let changed = patch.apply_to(element);
        self.bound = Some(element.temp_id);
        self.form = Some(PropertyForm::from(&*element));
        changed
    }

    /// Element the form currently shows
    pub fn bound(&self) -> Option<ElementId> {
        self.bound
    }

    pub fn form(&self) -> Option<&PropertyForm> {
        self.form.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.form.is_some()
    }
}
