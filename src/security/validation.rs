//! Request Validation Module
//!
//! Provides request validation and input sanitization for the chat API.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Validation error types
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing or empty")]
    MissingField { field: String },

    #[error("Field '{field}' is too long (max: {max}, got: {got})")]
    TooLong {
        field: String,
        max: usize,
        got: usize,
    },

    #[error("Field '{field}' contains control characters")]
    ControlCharacters { field: String },

    #[error("Field '{field}' is not a valid identifier: {value}")]
    InvalidIdentifier { field: String, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } => field.as_str(),
            Self::TooLong { field, .. } => field.as_str(),
            Self::ControlCharacters { field } => field.as_str(),
            Self::InvalidIdentifier { field, .. } => field.as_str(),
        }
    }
}

/// Validation result type
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

static NAME_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} .'\-]*$").unwrap());

/// Request validator implementation
#[derive(Debug, Clone)]
pub struct RequestValidator {
    /// Maximum allowed message length in characters
    max_message_length: usize,
    /// Maximum allowed display-name length in characters
    max_name_length: usize,
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new(4_000)
    }
}

impl RequestValidator {
    /// Create new validator
    pub fn new(max_message_length: usize) -> Self {
        Self {
            max_message_length,
            max_name_length: 64,
        }
    }

    /// Validate a chat message body
    pub fn validate_message(&self, value: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "message".to_string(),
            });
        }

        let length = value.chars().count();
        if length > self.max_message_length {
            return Err(ValidationError::TooLong {
                field: "message".to_string(),
                max: self.max_message_length,
                got: length,
            });
        }

        // Newlines and tabs are fine in free text, other control chars are not
        if value
            .chars()
            .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
        {
            return Err(ValidationError::ControlCharacters {
                field: "message".to_string(),
            });
        }

        Ok(())
    }

    /// Validate an optional display name
    pub fn validate_user_name(&self, value: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "user_name".to_string(),
            });
        }

        let length = value.chars().count();
        if length > self.max_name_length {
            return Err(ValidationError::TooLong {
                field: "user_name".to_string(),
                max: self.max_name_length,
                got: length,
            });
        }

        if !NAME_PATTERN.is_match(value.trim()) {
            return Err(ValidationError::InvalidIdentifier {
                field: "user_name".to_string(),
                value: value.to_string(),
            });
        }

        Ok(())
    }
}
