//! Storage initialization
//!
//! Handles first-run setup: the "Not stated" fallback category and one
//! budget limit row per period.

use crate::error::BookkeeperResult;
use crate::models::{BudgetLimit, Category, Period};

use super::Storage;

/// Seed whatever a usable store needs and is missing
///
/// Existing rows are never touched, so calling this again is a no-op.
pub fn initialize_storage(storage: &Storage) -> BookkeeperResult<()> {
    if !needs_initialization(storage)? {
        return Ok(());
    }

    storage.transaction(|store| {
        if store.categories.find(Category::is_sentinel)?.is_none() {
            let sentinel = Category::not_stated();
            store.categories.insert(sentinel.clone())?;
            store.log_create(&sentinel)?;
        }

        for period in Period::all() {
            if store.budget_limits.get(*period)?.is_none() {
                let limit = BudgetLimit::new(*period);
                store.budget_limits.insert(limit.clone())?;
                store.log_create(&limit)?;
            }
        }

        tracing::info!("initialized record store");
        Ok(())
    })
}

/// Check if the sentinel category or any budget limit row is missing
pub fn needs_initialization(storage: &Storage) -> BookkeeperResult<bool> {
    if storage.categories.find(Category::is_sentinel)?.is_none() {
        return Ok(true);
    }
    for period in Period::all() {
        if storage.budget_limits.get(*period)?.is_none() {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BookkeeperPaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookkeeperPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_initialize_storage() {
        let (_temp, storage) = create_test_storage();
        assert!(needs_initialization(&storage).unwrap());

        initialize_storage(&storage).unwrap();

        assert!(!needs_initialization(&storage).unwrap());
        assert!(storage.is_initialized());

        let categories = storage.categories.get_all().unwrap();
        assert_eq!(categories.len(), 1);
        assert!(categories[0].is_sentinel());
        assert!(categories[0].is_root());
    }

    #[test]
    fn test_default_limits_are_zero() {
        let (_temp, storage) = create_test_storage();
        initialize_storage(&storage).unwrap();

        let limits = storage.budget_limits.get_all().unwrap();
        let periods: Vec<_> = limits.iter().map(|l| l.period).collect();
        assert_eq!(periods, Period::all());
        assert!(limits.iter().all(|l| l.limit.is_zero() && l.spent.is_zero()));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let (_temp, storage) = create_test_storage();
        initialize_storage(&storage).unwrap();
        storage
            .budget_limits
            .update(Period::Day, |l| l.limit = Money::from_units(30))
            .unwrap();
        let audit_before = storage.audit().read_all().unwrap().len();

        initialize_storage(&storage).unwrap();

        let day = storage.budget_limits.get(Period::Day).unwrap().unwrap();
        assert_eq!(day.limit, Money::from_units(30));
        assert_eq!(storage.categories.count().unwrap(), 1);
        assert_eq!(storage.audit().read_all().unwrap().len(), audit_before);
    }

    #[test]
    fn test_repairs_missing_rows() {
        let (_temp, storage) = create_test_storage();
        initialize_storage(&storage).unwrap();
        storage.budget_limits.delete(Period::Week).unwrap();

        initialize_storage(&storage).unwrap();

        assert!(storage.budget_limits.get(Period::Week).unwrap().is_some());
        assert_eq!(storage.budget_limits.count().unwrap(), 3);
    }
}
