//! Field-level validation errors for record data

use std::fmt;

use serde::{Deserialize, Serialize};

use super::record_type::RecordType;
use crate::errors::NowipError;

/// One failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name; empty when the whole payload is rejected.
    pub field: String,
    pub message: String,
}

/// Every failing field of one record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValidationError {
    pub record_type: RecordType,
    pub errors: Vec<FieldError>,
}

impl RecordValidationError {
    /// Start an empty error for `record_type`.
    pub fn new(record_type: RecordType) -> Self {
        Self { record_type, errors: Vec::new() }
    }

    /// Add a field-level error.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError { field: field.into(), message: message.into() });
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Names of the failing fields, in schema order.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Message for `field`, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} record", self.record_type)?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            if error.field.is_empty() {
                write!(f, "{sep}{}", error.message)?;
            } else {
                write!(f, "{sep}{} {}", error.field, error.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for RecordValidationError {}

impl From<RecordValidationError> for NowipError {
    fn from(err: RecordValidationError) -> Self {
        NowipError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_each_field() {
        let mut err = RecordValidationError::new(RecordType::Mx);
        err.add("exchange", "is required");
        err.add("priority", "must be between 0 and 65535");

        assert_eq!(
            err.to_string(),
            "invalid MX record: exchange is required; priority must be between 0 and 65535"
        );
        assert_eq!(err.message_for("exchange"), Some("is required"));
        assert_eq!(err.message_for("ttl"), None);
    }

    #[test]
    fn converts_into_invalid_input() {
        let mut err = RecordValidationError::new(RecordType::A);
        err.add("", "expected an object");

        let converted: NowipError = err.into();
        assert_eq!(
            converted,
            NowipError::InvalidInput("invalid A record: expected an object".into())
        );
    }
}
