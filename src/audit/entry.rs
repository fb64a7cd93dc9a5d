//! One line of the audit log
//!
//! Entries are built straight from the record that changed: the record kind,
//! id and label come from its [`Record`] impl, and the before/after values are
//! its serialized form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::Record;

use super::diff::generate_diff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Record kinds that end up in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Category,
    Expense,
    BudgetLimit,
}

impl EntityType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Expense => "Expense",
            Self::BudgetLimit => "BudgetLimit",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// UTC time the entry was built
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// The record's label: a category name, an expense amount and comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Changed fields, for updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// `record` was inserted
    pub fn created<R: Record>(record: &R) -> Self {
        Self {
            after: serde_json::to_value(record).ok(),
            ..Self::about(Operation::Create, record)
        }
    }

    /// `before` was replaced by `after`
    pub fn updated<R: Record>(before: &R, after: &R) -> Self {
        let before = serde_json::to_value(before).ok();
        let after_value = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            before,
            after: after_value,
            diff_summary,
            ..Self::about(Operation::Update, after)
        }
    }

    /// `record` was removed
    pub fn deleted<R: Record>(record: &R) -> Self {
        Self {
            before: serde_json::to_value(record).ok(),
            ..Self::about(Operation::Delete, record)
        }
    }

    fn about<R: Record>(operation: Operation, record: &R) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type: R::KIND,
            entity_id: record.id().to_string(),
            entity_name: record.label(),
            before: None,
            after: None,
            diff_summary: None,
        }
    }
}

/// `[time] OPERATION Kind id (label)`, with changes on a second line
impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        )?;
        if let Some(name) = &self.entity_name {
            write!(f, " ({})", name)?;
        }
        if let Some(diff) = &self.diff_summary {
            write!(f, "\n  Changes: {}", diff)?;
        }
        Ok(())
    }
}
