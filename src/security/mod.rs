//! Security Module
//!
//! Input validation for the chat API:
//! - Message body validation (length, control characters)
//! - Display-name validation

pub mod validation;

pub use validation::{RequestValidator, ValidationError, ValidationResult};
