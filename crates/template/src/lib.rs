//! Template - the template description exchanged with the persistence layer
//!
//! This crate provides:
//! - Template JSON schema types (page size, query filters, text elements)
//! - Template parsing from JSON
//! - Content-type descriptors received from the metadata lookup
//! - Save-time validation of a template description
//!
//! # Example
//!
//! ```ignore
//! use template::{parse_template, PageSize, Template};
//!
//! let mut template = Template::new("Invoice", "INV-01");
//! template
//!     .set_page_size(PageSize::Letter)
//!     .insert_text("Customer:", 40.0, 60.0, 12)
//!     .insert_binding("customer.name", 120.0, 60.0, 12);
//! template.validate()?;
//!
//! let json = template.to_json()?;
//! let parsed = parse_template(&json)?;
//! ```

pub mod parser;
mod schema;
mod validate;

pub use parser::{parse_content_types, parse_template};
pub use schema::*;
pub use validate::{ValidationErrors, ValidationIssue};

// Re-export the embedded schema
pub use schema::TEMPLATE_SCHEMA;

use thiserror::Error;

/// Errors that can occur while handling template descriptions
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse template: {0}")]
    ParseError(String),

    #[error("Template validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
