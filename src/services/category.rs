//! Category service
//!
//! Reads the category tree and replaces it wholesale from indented text.
//!
//! Identity across a replacement is the category *name*: every old category
//! whose name appears in the new text hands its expenses to the new category
//! with that name, and every other expense moves to the "Not stated" fallback.

use std::collections::HashMap;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

use super::category_tree::{parse_tree, render_tree};

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// What a tree replacement changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Categories written from the text, not counting the fallback
    pub categories_written: usize,
    /// Expenses moved to the new category of the same name
    pub expenses_remapped: usize,
    /// Expenses moved to the fallback because their category went away
    pub expenses_orphaned: usize,
    /// Names present before and absent from the new text
    pub names_removed: Vec<String>,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All categories including the fallback, in store order
    pub fn list(&self) -> BookkeeperResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Names a user can file an expense under
    pub fn names(&self) -> BookkeeperResult<Vec<String>> {
        Ok(self
            .storage
            .categories
            .filter(|c| !c.is_sentinel())?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    pub fn get_by_name(&self, name: &str) -> BookkeeperResult<Option<Category>> {
        self.storage.categories.find(|c| c.name == name)
    }

    /// The fallback category
    pub fn sentinel(&self) -> BookkeeperResult<Category> {
        self.storage
            .categories
            .find(Category::is_sentinel)?
            .ok_or_else(|| BookkeeperError::category_not_found(Category::NOT_STATED))
    }

    /// The current tree as editable text
    pub fn tree_text(&self) -> BookkeeperResult<String> {
        Ok(render_tree(&self.list()?))
    }

    /// Replace the whole category tree with the one described by `text`
    ///
    /// Invalid text is rejected before anything is written. Otherwise the old
    /// categories are deleted, the fallback and the new categories are inserted
    /// parents first, and every expense is repointed, all in one transaction.
    pub fn reconcile(
        &self,
        text: &str,
        indent_width: usize,
    ) -> BookkeeperResult<ReconcileReport> {
        let parsed = parse_tree(text, indent_width)?;

        let report = self.storage.transaction(|store| {
            let previous = store.categories.delete_all()?;
            for category in &previous {
                store.log_delete(category)?;
            }

            let sentinel = Category::not_stated();
            store.categories.insert(sentinel.clone())?;
            store.log_create(&sentinel)?;

            let mut new_ids: HashMap<&str, CategoryId> = HashMap::new();
            for node in &parsed {
                let category = match &node.parent {
                    None => Category::new(&node.name),
                    Some(parent) => {
                        let parent_id = new_ids
                            .get(parent.as_str())
                            .copied()
                            .ok_or_else(|| BookkeeperError::category_not_found(parent.as_str()))?;
                        Category::with_parent(&node.name, parent_id)
                    }
                };
                new_ids.insert(&node.name, store.categories.insert(category.clone())?);
                store.log_create(&category)?;
            }

            let mut report = ReconcileReport {
                categories_written: parsed.len(),
                ..ReconcileReport::default()
            };

            let mut remap: HashMap<CategoryId, CategoryId> = HashMap::new();
            let mut old_sentinels = Vec::new();
            for old in &previous {
                if old.is_sentinel() {
                    old_sentinels.push(old.id);
                } else if let Some(new_id) = new_ids.get(old.name.as_str()) {
                    remap.insert(old.id, *new_id);
                } else {
                    report.names_removed.push(old.name.clone());
                }
            }

            for expense in store.expenses.get_all()? {
                let (before, after) = match remap.get(&expense.category_id) {
                    Some(new_id) => {
                        report.expenses_remapped += 1;
                        store
                            .expenses
                            .update(expense.id, |e| e.category_id = *new_id)?
                    }
                    None if old_sentinels.contains(&expense.category_id) => store
                        .expenses
                        .update(expense.id, |e| e.category_id = sentinel.id)?,
                    None => {
                        report.expenses_orphaned += 1;
                        store
                            .expenses
                            .update(expense.id, |e| e.set_category(sentinel.id))?
                    }
                };
                store.log_update(&before, &after)?;
            }

            Ok(report)
        })?;

        tracing::info!(
            categories = report.categories_written,
            remapped = report.expenses_remapped,
            orphaned = report.expenses_orphaned,
            removed = report.names_removed.len(),
            "category tree replaced"
        );

        Ok(report)
    }
}
