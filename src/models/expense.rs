//! Expense model
//!
//! An expense is a single purchase: when it happened, how much it cost, which
//! category it belongs to and a free-form comment.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// When the purchase happened (local wall-clock time)
    pub date: NaiveDateTime,

    /// Category this expense is filed under
    pub category_id: CategoryId,

    /// Amount spent, never negative
    pub amount: Money,

    #[serde(default)]
    pub comment: String,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        date: NaiveDateTime,
        category_id: CategoryId,
        amount: Money,
        comment: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            date,
            category_id,
            amount,
            comment: comment.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// File the expense under another category
    pub fn set_category(&mut self, category_id: CategoryId) {
        self.category_id = category_id;
        self.touch();
    }

    /// Mark the expense as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether the expense falls inside `[start, end]`
    pub fn is_within(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.date >= start && self.date <= end
    }
}

/// A partial update to an expense; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub date: Option<NaiveDateTime>,
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub comment: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category_id.is_none()
            && self.amount.is_none()
            && self.comment.is_none()
    }

    /// Apply the set fields to `expense`
    pub fn apply(self, expense: &mut Expense) {
        if self.is_empty() {
            return;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(category_id) = self.category_id {
            expense.category_id = category_id;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(comment) = self.comment {
            expense.comment = comment;
        }
        expense.touch();
    }
}
