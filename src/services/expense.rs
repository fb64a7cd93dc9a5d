//! Expense service
//!
//! Creating, editing and deleting expenses. All user input arrives as raw
//! text and passes through the field validators below before anything is
//! written; a failed validation leaves the store untouched.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{BookkeeperResult, ValidationError};
use crate::models::{Category, CategoryId, Expense, ExpenseId, ExpensePatch, Money};
use crate::storage::Storage;

/// Parse a non-negative money amount; `field` names the input in messages
pub fn validate_amount(field: &'static str, raw: &str) -> Result<Money, ValidationError> {
    let value = raw.trim();
    let amount = Money::parse(value).map_err(|_| ValidationError::InvalidAmount {
        field,
        value: value.to_string(),
    })?;

    if amount.is_negative() {
        return Err(ValidationError::NegativeAmount {
            field,
            value: value.to_string(),
        });
    }

    Ok(amount)
}

/// Parse a date that matches `format` exactly
pub fn validate_date(raw: &str, format: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = raw.trim();
    NaiveDateTime::parse_from_str(value, format).map_err(|_| ValidationError::InvalidDate {
        value: value.to_string(),
        format: format.to_string(),
    })
}

/// Resolve a user-visible category name; the fallback is not selectable
pub fn validate_category(storage: &Storage, raw: &str) -> BookkeeperResult<CategoryId> {
    let name = raw.trim();
    storage
        .categories
        .find(|c| !c.is_sentinel() && c.name == name)?
        .map(|c| c.id)
        .ok_or_else(|| {
            ValidationError::UnknownCategory {
                name: name.to_string(),
            }
            .into()
        })
}

/// Raw text of a new expense as the user typed it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub comment: String,
}

/// A single expense column the user may edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Date,
    Amount,
    Category,
    Comment,
}

impl EditableField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditableField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            "comment" => Ok(Self::Comment),
            _ => Err(ValidationError::UnknownField {
                value: s.to_string(),
            }),
        }
    }
}

/// One display-ready row of the expense table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRow {
    pub id: ExpenseId,
    pub date: String,
    pub amount: Money,
    pub category: String,
    pub comment: String,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    date_format: &'a str,
}

impl<'a> ExpenseService<'a> {
    /// Create a service that reads and writes dates in `date_format`
    pub fn new(storage: &'a Storage, date_format: &'a str) -> Self {
        Self {
            storage,
            date_format,
        }
    }

    /// Validate and record a new expense
    pub fn add(&self, form: &ExpenseForm) -> BookkeeperResult<Expense> {
        let amount = validate_amount("Amount", &form.amount)?;
        let date = validate_date(&form.date, self.date_format)?;
        let category_id = validate_category(self.storage, &form.category)?;

        let expense = Expense::new(date, category_id, amount, form.comment.trim());
        self.storage.expenses.insert(expense.clone())?;
        self.storage.save_all()?;
        self.storage.log_create(&expense)?;

        tracing::info!(id = %expense.id, amount = %expense.amount, "expense added");
        Ok(expense)
    }

    /// Get all expenses in store order
    pub fn list(&self) -> BookkeeperResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Find the expense an identifier refers to
    ///
    /// Accepts the full id, the short `exp-xxxxxxxx` form, or a hex prefix that
    /// names exactly one expense.
    pub fn resolve(&self, identifier: &str) -> BookkeeperResult<Expense> {
        let mut matches = self.storage.expenses.filter(|e| e.id.matches(identifier))?;
        if matches.len() == 1 {
            return Ok(matches.remove(0));
        }
        Err(ValidationError::ExpenseNotFound {
            id: identifier.trim().to_string(),
        }
        .into())
    }

    /// Edit one field of one expense from raw text
    pub fn update_field(
        &self,
        identifier: &str,
        field: EditableField,
        raw: &str,
    ) -> BookkeeperResult<Expense> {
        let expense = self.resolve(identifier)?;

        let patch = match field {
            EditableField::Date => ExpensePatch {
                date: Some(validate_date(raw, self.date_format)?),
                ..ExpensePatch::default()
            },
            EditableField::Amount => ExpensePatch {
                amount: Some(validate_amount("Amount", raw)?),
                ..ExpensePatch::default()
            },
            EditableField::Category => ExpensePatch {
                category_id: Some(validate_category(self.storage, raw)?),
                ..ExpensePatch::default()
            },
            EditableField::Comment => ExpensePatch {
                comment: Some(raw.trim().to_string()),
                ..ExpensePatch::default()
            },
        };

        let (before, after) = self
            .storage
            .expenses
            .update(expense.id, |e| patch.apply(e))?;
        self.storage.save_all()?;
        self.storage.log_update(&before, &after)?;

        tracing::info!(id = %after.id, %field, "expense edited");
        Ok(after)
    }

    /// Delete every listed expense, or none if any identifier is unknown
    pub fn delete(&self, identifiers: &[String]) -> BookkeeperResult<Vec<Expense>> {
        let mut ids: Vec<ExpenseId> = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let id = self.resolve(identifier)?.id;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        let removed = self.storage.transaction(|store| {
            let mut removed = Vec::with_capacity(ids.len());
            for id in &ids {
                let expense = store.expenses.delete(*id)?;
                store.log_delete(&expense)?;
                removed.push(expense);
            }
            Ok(removed)
        })?;

        tracing::info!(count = removed.len(), "expenses deleted");
        Ok(removed)
    }

    /// Display rows ordered by date, then by when they were recorded
    pub fn rows(&self) -> BookkeeperResult<Vec<ExpenseRow>> {
        let categories = self.storage.categories.get_all()?;
        let mut expenses = self.storage.expenses.get_all()?;
        expenses.sort_by_key(|e| (e.date, e.created_at));

        Ok(expenses
            .into_iter()
            .map(|e| {
                let category = categories
                    .iter()
                    .find(|c| c.id == e.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| Category::NOT_STATED.to_string());
                ExpenseRow {
                    id: e.id,
                    date: e.date.format(self.date_format).to_string(),
                    amount: e.amount,
                    category,
                    comment: e.comment,
                }
            })
            .collect())
    }
}
