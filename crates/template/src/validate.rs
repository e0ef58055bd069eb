//! Save-time validation of a template description

use std::fmt;

use crate::{Result, Template, TemplateError};

/// A single failed save precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingName,
    MissingCode,
    NoElements,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationIssue::MissingName => "name is required",
            ValidationIssue::MissingCode => "code is required",
            ValidationIssue::NoElements => "at least one element is required",
        };
        f.write_str(message)
    }
}

/// All failed preconditions of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn contains(&self, issue: ValidationIssue) -> bool {
        self.0.contains(&issue)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ValidationIssue>> for ValidationErrors {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        Self(issues)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Check the save preconditions for a name, code and element count
///
/// Whitespace-only names and codes count as missing.
pub fn check(name: &str, code: &str, element_count: usize) -> ValidationErrors {
    let mut issues = Vec::new();
    if name.trim().is_empty() {
        issues.push(ValidationIssue::MissingName);
    }
    if code.trim().is_empty() {
        issues.push(ValidationIssue::MissingCode);
    }
    if element_count == 0 {
        issues.push(ValidationIssue::NoElements);
    }
    ValidationErrors(issues)
}

impl Template {
    /// Validate the save preconditions
    pub fn validate(&self) -> Result<()> {
        let errors = check(&self.name, &self.code, self.elements.len());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TemplateError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_template() {
        let mut template = Template::new("Receipt", "RC");
        template.insert_text("Hello", 0.0, 0.0, 12);
        assert!(template.validate().is_ok());
    }

    #[test]
    fn test_collects_every_issue() {
        let template = Template::new(" ", "");
        match template.validate() {
            Err(TemplateError::Validation(errors)) => {
                assert_eq!(
                    errors.issues(),
                    &[
                        ValidationIssue::MissingName,
                        ValidationIssue::MissingCode,
                        ValidationIssue::NoElements
                    ]
                );
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_only_elements_missing() {
        let errors = check("a", "b", 0);
        assert!(errors.contains(ValidationIssue::NoElements));
        assert!(!errors.contains(ValidationIssue::MissingName));
    }
}
