// Validation errors

use crate::RuleKind;
use serde::Serialize;
use serde::ser::SerializeStruct;
use std::fmt;
use thiserror::Error;

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cause {
    /// Malformed rule string, unknown rule kind, or unusable parameter
    #[error("invalid validator syntax")]
    InvalidSyntax,

    /// Rules attached to a field that is not `pub`
    #[error("validation for unexported field is not allowed")]
    UnexportedField,

    #[error("len validation failed")]
    LenFailed,

    #[error("in validation failed")]
    InFailed,

    #[error("min validation failed")]
    MinFailed,

    #[error("max validation failed")]
    MaxFailed,

    /// The rule does not apply to the field's runtime shape
    #[error("{rule} requires {expected}, got {found}")]
    TypeMismatch {
        rule: RuleKind,
        expected: &'static str,
        found: &'static str,
    },
}

impl Cause {
    /// Short constraint name used in JSON reports.
    pub fn constraint(&self) -> &'static str {
        match self {
            Cause::InvalidSyntax => "syntax",
            Cause::UnexportedField => "unexported",
            Cause::LenFailed => "len",
            Cause::InFailed => "in",
            Cause::MinFailed => "min",
            Cause::MaxFailed => "max",
            Cause::TypeMismatch { .. } => "type",
        }
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Cause::TypeMismatch { .. })
    }
}

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {cause}")]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// What went wrong
    #[source]
    pub cause: Cause,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, cause: Cause) -> Self {
        Self {
            field: field.into(),
            cause,
        }
    }

    /// Whether this error was caused by `cause`.
    pub fn is(&self, cause: &Cause) -> bool {
        &self.cause == cause
    }
}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationError", 3)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("message", &self.cause.to_string())?;
        state.serialize_field("constraint", self.cause.constraint())?;
        state.end()
    }
}

/// Every violation found in one validation pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Whether any component error was caused by `cause`.
    pub fn contains(&self, cause: &Cause) -> bool {
        self.errors.iter().any(|e| e.is(cause))
    }

    /// Whether any component cause satisfies `predicate`.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Cause) -> bool,
    {
        self.errors.iter().any(|e| predicate(&e.cause))
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// `{"errors": [{"field", "message", "constraint"}, ...]}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.errors })
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Call-level outcome of [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The value handed to `validate` has no fields to inspect
    #[error("wrong argument given, should be a struct")]
    NotStruct,

    /// One or more fields violated their rules
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl Error {
    /// The aggregate of violations, unless this is a precondition failure.
    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            Error::NotStruct => None,
            Error::Invalid(errors) => Some(errors),
        }
    }

    /// Whether any violation in the aggregate was caused by `cause`.
    pub fn contains(&self, cause: &Cause) -> bool {
        self.violations().is_some_and(|errors| errors.contains(cause))
    }
}
