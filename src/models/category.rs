//! Category model
//!
//! Categories form a forest: each category optionally points at a parent.
//! One distinguished root, [`Category::NOT_STATED`], always exists. It is never
//! edited by the user and collects expenses whose category went away.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// An expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, unique across the whole tree
    pub name: String,

    /// Parent category, `None` for roots
    #[serde(default)]
    pub parent: Option<CategoryId>,
}

impl Category {
    /// Name of the fallback category
    pub const NOT_STATED: &'static str = "Not stated";

    /// Create a new root category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            parent: None,
        }
    }

    /// Create a new category under `parent`
    pub fn with_parent(name: impl Into<String>, parent: CategoryId) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(name)
        }
    }

    /// Create the fallback category
    pub fn not_stated() -> Self {
        Self::new(Self::NOT_STATED)
    }

    /// Whether this is the fallback category
    pub fn is_sentinel(&self) -> bool {
        self.name == Self::NOT_STATED
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.trim() != self.name {
            return Err(CategoryValidationError::UntrimmedName(self.name.clone()));
        }

        if self.parent == Some(self.id) {
            return Err(CategoryValidationError::OwnParent);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    UntrimmedName(String),
    OwnParent,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::UntrimmedName(name) => {
                write!(f, "Category name {:?} has surrounding whitespace", name)
            }
            Self::OwnParent => write!(f, "Category cannot be its own parent"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
