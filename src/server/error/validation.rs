//! Field-level validation failures.

use std::fmt;

use validator::ValidationErrors;

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

/// Every rejected field of one request, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Convenience constructor for a failure on one field.
    pub fn single(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, msg);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, msg: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            msg: msg.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    /// Returns `Err(self)` when any field was rejected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input")?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { ", " };
            write!(f, "{}{} ({})", sep, error.field, error.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Flattens derive-based validation results, sorted by field name so responses are stable.
impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = FieldErrors::new();
        for (field, errors) in fields {
            for error in errors.iter() {
                let msg = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                out.push(field.to_string(), msg);
            }
        }
        out
    }
}
