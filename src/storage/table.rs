//! Generic in-memory table of records
//!
//! Each record kind lives in one [`Table`], keyed by the record's id and kept
//! in insertion order. Tables never touch the disk themselves; `Storage` owns
//! persistence and auditing.

use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::audit::EntityType;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{BudgetLimit, Category, CategoryId, Expense, ExpenseId, Period};

/// A record kind the store can hold
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Primary key type
    type Id: Copy + Eq + fmt::Display + fmt::Debug;

    /// Kind reported in audit entries and not-found errors
    const KIND: EntityType;

    fn id(&self) -> Self::Id;

    /// Human-readable label for the audit log
    fn label(&self) -> Option<String> {
        None
    }
}

impl Record for Category {
    type Id = CategoryId;
    const KIND: EntityType = EntityType::Category;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Record for Expense {
    type Id = ExpenseId;
    const KIND: EntityType = EntityType::Expense;

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn label(&self) -> Option<String> {
        if self.comment.is_empty() {
            Some(self.amount.to_string())
        } else {
            Some(format!("{} {}", self.amount, self.comment))
        }
    }
}

impl Record for BudgetLimit {
    type Id = Period;
    const KIND: EntityType = EntityType::BudgetLimit;

    fn id(&self) -> Period {
        self.period
    }
}

fn not_found<R: Record>(id: R::Id) -> BookkeeperError {
    let identifier = id.to_string();
    match R::KIND {
        EntityType::Category => BookkeeperError::category_not_found(identifier),
        EntityType::Expense => BookkeeperError::expense_not_found(identifier),
        EntityType::BudgetLimit => BookkeeperError::budget_limit_not_found(identifier),
    }
}

/// Records of one kind in insertion order
pub struct Table<R: Record> {
    rows: RwLock<Vec<R>>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Table<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> BookkeeperResult<RwLockReadGuard<'_, Vec<R>>> {
        self.rows
            .read()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> BookkeeperResult<RwLockWriteGuard<'_, Vec<R>>> {
        self.rows
            .write()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace every row, used when loading and when rolling back
    pub(crate) fn replace(&self, rows: Vec<R>) -> BookkeeperResult<()> {
        *self.write()? = rows;
        Ok(())
    }

    /// All records in insertion order
    pub fn get_all(&self) -> BookkeeperResult<Vec<R>> {
        Ok(self.read()?.clone())
    }

    pub fn get(&self, id: R::Id) -> BookkeeperResult<Option<R>> {
        Ok(self.read()?.iter().find(|r| r.id() == id).cloned())
    }

    /// First record matching `predicate`
    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> BookkeeperResult<Option<R>> {
        Ok(self.read()?.iter().find(|r| predicate(r)).cloned())
    }

    /// Every record matching `predicate`
    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> BookkeeperResult<Vec<R>> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }

    /// Append a record and return its id
    pub fn insert(&self, record: R) -> BookkeeperResult<R::Id> {
        let mut rows = self.write()?;
        let id = record.id();
        if rows.iter().any(|r| r.id() == id) {
            return Err(BookkeeperError::Storage(format!(
                "{} {} already exists",
                R::KIND,
                id
            )));
        }
        rows.push(record);
        Ok(id)
    }

    /// Modify one record in place, returning `(before, after)`
    ///
    /// The closure may change any field except the id.
    pub fn update(&self, id: R::Id, apply: impl FnOnce(&mut R)) -> BookkeeperResult<(R, R)> {
        let mut rows = self.write()?;
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found::<R>(id))?;

        let before = row.clone();
        apply(row);
        if row.id() != id {
            *row = before;
            return Err(BookkeeperError::Storage(format!(
                "Update of {} {} tried to change its id",
                R::KIND,
                id
            )));
        }

        Ok((before, row.clone()))
    }

    /// Remove one record and return it
    pub fn delete(&self, id: R::Id) -> BookkeeperResult<R> {
        let mut rows = self.write()?;
        let index = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<R>(id))?;
        Ok(rows.remove(index))
    }

    /// Remove every record and return them
    pub fn delete_all(&self) -> BookkeeperResult<Vec<R>> {
        Ok(std::mem::take(&mut *self.write()?))
    }

    pub fn count(&self) -> BookkeeperResult<usize> {
        Ok(self.read()?.len())
    }
}
