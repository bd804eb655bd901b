use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Errors surfaced by the crate outside of the validation result itself.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// One or more field rules failed.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Raw input could not be read as an invoice-shaped JSON document.
    #[error("malformed invoice JSON: {0}")]
    Json(String),

    /// Client configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<FieldErrors> for InvoiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the invalid field (e.g. "lines[1].amount").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Field-keyed validation failures, one message per path.
///
/// Errors keep the order in which rules were checked. When a path is
/// reported twice only the first message is retained, so a caller
/// rendering field feedback always sees the first rule that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<ValidationError>,
}

impl FieldErrors {
    /// Record `message` for `field` unless that path already has one.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push(ValidationError::new(field, message));
        }
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Path-to-message mapping, for callers that look fields up by name.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.field.clone(), e.message.clone()))
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
