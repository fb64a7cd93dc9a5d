//! Custom error types for Bookkeeper
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! User input problems are [`ValidationError`]s: they are recovered locally and
//! never leave partial writes behind. Everything else is a [`BookkeeperError`].

use thiserror::Error;

/// Rejected user input. Every variant names the offending value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A money field that does not parse as a number
    #[error("{field} {value:?} should be a number")]
    InvalidAmount { field: &'static str, value: String },

    /// A money field below zero
    #[error("{field} {value:?} should not be negative")]
    NegativeAmount { field: &'static str, value: String },

    /// A date that does not match the configured format exactly
    #[error("Date {value:?} is incorrect, expected format {format:?}")]
    InvalidDate { value: String, format: String },

    /// A category name that is not in the current category list
    #[error("Category {name:?} is not in the category list")]
    UnknownCategory { name: String },

    /// The same category name appears more than once in the tree text
    #[error("Category {name:?} appears more than once")]
    DuplicateCategory { name: String },

    /// The tree text mentions the reserved fallback category
    #[error("Category name {name:?} is reserved")]
    ReservedCategory { name: String },

    /// A line is nested more than one level below the line before it
    #[error("Line {line}: {name:?} is indented more than one level below its parent")]
    IndentJump { line: usize, name: String },

    /// Leading spaces that do not form whole indentation levels
    #[error("Line {line}: indentation is not a whole number of levels")]
    BadIndent { line: usize },

    /// An editable expense field name that does not exist
    #[error("Field {value:?} cannot be edited")]
    UnknownField { value: String },

    /// An edit or delete aimed at an expense id that does not exist
    #[error("Expense {id:?} does not exist")]
    ExpenseNotFound { id: String },
}

/// The main error type for Bookkeeper operations
#[derive(Error, Debug)]
pub enum BookkeeperError {
    /// Rejected user input; nothing was written
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A lookup failed where the record was expected to exist
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The record store could not complete the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl BookkeeperError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budget limits
    pub fn budget_limit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget limit",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The validation error, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BookkeeperError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BookkeeperError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Bookkeeper operations
pub type BookkeeperResult<T> = Result<T, BookkeeperError>;
