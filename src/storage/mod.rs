//! Storage layer for Bookkeeper
//!
//! All records live in one JSON document (`data/store.json`) holding three
//! tables: categories, expenses and budget limits. Every mutation persists the
//! whole document with an atomic write, so the file on disk is always a
//! consistent snapshot.
//!
//! Multi-step operations run inside [`Storage::transaction`]: the tables are
//! snapshotted first and restored if the closure fails, the document is written
//! once on success, and audit entries are held back until the commit.

pub mod file_io;
pub mod init;
pub mod table;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use table::{Record, Table};

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::BookkeeperPaths;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{BudgetLimit, Category, CategoryId, Expense, Money};

/// On-disk shape of the record store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budget_limits: Vec<BudgetLimit>,
}

/// Main storage coordinator that provides access to all tables
pub struct Storage {
    paths: BookkeeperPaths,
    pub categories: Table<Category>,
    pub expenses: Table<Expense>,
    pub budget_limits: Table<BudgetLimit>,
    audit: AuditLogger,
    /// Audit entries held back while a transaction is open
    journal: Mutex<Option<Vec<AuditEntry>>>,
}

impl Storage {
    /// Create an empty Storage instance without reading the disk
    pub fn new(paths: BookkeeperPaths) -> BookkeeperResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: Table::new(),
            expenses: Table::new(),
            budget_limits: Table::new(),
            audit: AuditLogger::new(paths.audit_log()),
            journal: Mutex::new(None),
            paths,
        })
    }

    /// Load the store from disk and seed anything a first run needs
    pub fn open(paths: BookkeeperPaths) -> BookkeeperResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        initialize_storage(&storage)?;
        Ok(storage)
    }

    pub fn paths(&self) -> &BookkeeperPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Check if the store document has been written at least once
    pub fn is_initialized(&self) -> bool {
        self.paths.store_file().exists()
    }

    /// Load all tables from disk, replacing what is in memory
    pub fn load_all(&self) -> BookkeeperResult<()> {
        let data: StoreData = read_json(self.paths.store_file())?;
        tracing::debug!(
            categories = data.categories.len(),
            expenses = data.expenses.len(),
            "loaded record store"
        );
        for category in &data.categories {
            category.validate().map_err(|e| {
                BookkeeperError::Storage(format!("Category {}: {}", category.id, e))
            })?;
        }
        self.restore(data)
    }

    /// Persist all tables
    ///
    /// Inside a transaction this is deferred to the commit.
    pub fn save_all(&self) -> BookkeeperResult<()> {
        if self.in_transaction()? {
            return Ok(());
        }
        self.write_document()
    }

    pub fn in_transaction(&self) -> BookkeeperResult<bool> {
        Ok(self.journal()?.is_some())
    }

    /// Run `body` as one unit of work
    ///
    /// On `Err` every table is restored to its state before the call and no
    /// audit entries are written. On `Ok` the document is written once and the
    /// buffered audit entries are flushed. Transactions do not nest.
    pub fn transaction<T>(
        &self,
        body: impl FnOnce(&Self) -> BookkeeperResult<T>,
    ) -> BookkeeperResult<T> {
        let snapshot = self.snapshot()?;
        {
            let mut journal = self.journal()?;
            if journal.is_some() {
                return Err(BookkeeperError::Storage(
                    "A transaction is already in progress".into(),
                ));
            }
            *journal = Some(Vec::new());
        }

        let result = body(self).and_then(|value| self.write_document().map(|()| value));
        let entries = self.journal().map(|mut j| j.take().unwrap_or_default());

        match result {
            Ok(value) => {
                self.audit.log_batch(&entries?)?;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "rolling back transaction");
                self.restore(snapshot)?;
                Err(err)
            }
        }
    }

    /// Record the creation of `record` in the audit log
    pub fn log_create<R: Record>(&self, record: &R) -> BookkeeperResult<()> {
        self.record_audit(AuditEntry::created(record))
    }

    /// Record a change to a record, with a summary of the changed fields
    pub fn log_update<R: Record>(&self, before: &R, after: &R) -> BookkeeperResult<()> {
        self.record_audit(AuditEntry::updated(before, after))
    }

    /// Record the deletion of `record`
    pub fn log_delete<R: Record>(&self, record: &R) -> BookkeeperResult<()> {
        self.record_audit(AuditEntry::deleted(record))
    }

    /// Total amount of expenses dated within `[start, end]`, zero when none
    pub fn sum_amount_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BookkeeperResult<Money> {
        self.expenses
            .filter(|e| e.is_within(start, end))?
            .iter()
            .try_fold(Money::zero(), |total, e| add_amount(total, e.amount))
    }

    /// Totals within `[start, end]` per category name, ordered by name
    ///
    /// Expenses whose category no longer exists are left out.
    pub fn sum_amount_in_range_by_category(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BookkeeperResult<Vec<(String, Money)>> {
        let categories = self.categories.get_all()?;
        let mut totals: BTreeMap<String, Money> = BTreeMap::new();

        for expense in self.expenses.filter(|e| e.is_within(start, end))? {
            if let Some(category) = categories.iter().find(|c| c.id == expense.category_id) {
                let total = totals.entry(category.name.clone()).or_default();
                *total = add_amount(*total, expense.amount)?;
            }
        }

        Ok(totals.into_iter().collect())
    }

    /// Id of the category with exactly this name
    pub fn find_category_id_by_name(&self, name: &str) -> BookkeeperResult<CategoryId> {
        self.categories
            .find(|c| c.name == name)?
            .map(|c| c.id)
            .ok_or_else(|| BookkeeperError::category_not_found(name))
    }

    fn journal(&self) -> BookkeeperResult<MutexGuard<'_, Option<Vec<AuditEntry>>>> {
        self.journal
            .lock()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire journal lock: {}", e)))
    }

    fn record_audit(&self, entry: AuditEntry) -> BookkeeperResult<()> {
        let mut journal = self.journal()?;
        match journal.as_mut() {
            Some(pending) => {
                pending.push(entry);
                Ok(())
            }
            None => {
                drop(journal);
                self.audit.log(&entry)
            }
        }
    }

    fn snapshot(&self) -> BookkeeperResult<StoreData> {
        Ok(StoreData {
            categories: self.categories.get_all()?,
            expenses: self.expenses.get_all()?,
            budget_limits: self.budget_limits.get_all()?,
        })
    }

    fn restore(&self, data: StoreData) -> BookkeeperResult<()> {
        self.categories.replace(data.categories)?;
        self.expenses.replace(data.expenses)?;
        self.budget_limits.replace(data.budget_limits)?;
        Ok(())
    }

    fn write_document(&self) -> BookkeeperResult<()> {
        write_json_atomic(self.paths.store_file(), &self.snapshot()?)
    }
}

fn add_amount(total: Money, amount: Money) -> BookkeeperResult<Money> {
    total.checked_add(amount).ok_or_else(|| {
        BookkeeperError::Storage(format!(
            "Expense total overflows when adding {} to {}",
            amount, total
        ))
    })
}
