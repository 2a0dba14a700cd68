//! Validation error types

use thiserror::Error;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is absent from the payload
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// Field is empty (or whitespace only) when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Field contains a NUL character
    #[error("{field} cannot contain NUL characters")]
    NulCharacter { field: &'static str },
}

impl ValidationError {
    /// True for errors caused by a required field not being supplied.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. } | Self::Empty { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "body",
            max: 65536,
        };
        assert_eq!(
            err.to_string(),
            "body exceeds maximum length of 65536 characters"
        );
        assert_eq!(
            ValidationError::NulCharacter { field: "username" }.to_string(),
            "username cannot contain NUL characters"
        );
        assert_eq!(
            ValidationError::Missing { field: "body" }.to_string(),
            "body is required"
        );
    }

    #[test]
    fn missing_and_empty_count_as_missing() {
        assert!(ValidationError::Missing { field: "body" }.is_missing());
        assert!(ValidationError::Empty { field: "body" }.is_missing());
        assert!(!ValidationError::TooLong { field: "body", max: 1 }.is_missing());
        assert!(!ValidationError::NulCharacter { field: "body" }.is_missing());
    }
}
