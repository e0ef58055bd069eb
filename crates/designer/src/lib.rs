//! Designer - visual PDF template designer core
//!
//! This crate provides the editing core behind the template designer canvas:
//! - Element store with single selection
//! - Snapshot-based undo/redo history
//! - Zoom, grid snap and bounds clamping for drag interactions
//! - Property form binding for the selected element
//! - Template settings (page size, content type, query filters)
//! - The designer controller tying them together and emitting save/cancel events
//!
//! The core never renders or persists anything. A successful save produces a
//! [`template::Template`] description which the host forwards to its backend.
//!
//! # Example
//!
//! ```ignore
//! use designer::{Designer, DesignerEvent, NewElement};
//!
//! let mut designer = Designer::default();
//! designer.set_name("Welcome");
//! designer.set_code("WELCOME");
//! let element = designer.add_element(NewElement::dynamic_field("user.email"));
//! designer.drag_end(element.temp_id, 35.0, 12.0)?;
//! designer.save()?;
//!
//! for event in designer.take_events() {
//!     if let DesignerEvent::Save(template) = event {
//!         backend.save(template);
//!     }
//! }
//! ```

mod config;
mod designer;
mod element;
pub mod geometry;
mod history;
mod properties;
mod settings;
mod store;

pub use config::DesignerConfig;
pub use designer::{Designer, DesignerEvent, DesignerState, Toolbar};
pub use element::{Element, ElementId, NewElement};
pub use geometry::{DragParams, Point};
pub use history::{History, Snapshot};
pub use properties::{PropertiesBinding, PropertyForm, PropertyPatch};
pub use settings::TemplateSettings;
pub use store::ElementStore;

// Re-export the contract types hosts need alongside the designer
pub use template::{
    ContentType, PageSize, QueryFilter, Size, Template, TemplateElement, ValidationErrors,
    ValidationIssue,
};

use thiserror::Error;

/// Errors that can occur in designer operations
#[derive(Debug, Error)]
pub enum DesignerError {
    #[error("Cannot save template: {0}")]
    Validation(ValidationErrors),

    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Invalid designer configuration: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] template::TemplateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for designer operations
pub type Result<T> = std::result::Result<T, DesignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DesignerError::ElementNotFound(7).to_string(),
            "Element not found: 7"
        );
        let err = DesignerError::Validation(ValidationErrors::from(vec![
            ValidationIssue::MissingCode,
        ]));
        assert_eq!(err.to_string(), "Cannot save template: code is required");
    }
}
