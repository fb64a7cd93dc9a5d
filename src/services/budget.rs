//! Budget service
//!
//! Computes spending for the day, week and month windows and compares it with
//! the stored limits.
//!
//! Reading spending also writes it: the `spent` column of each
//! [`BudgetLimit`] row is a cache refreshed by [`BudgetService::spend_for_period`],
//! so anything that displays `spent` should go through this service first.

use chrono::NaiveDateTime;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{BudgetLimit, Money, Period};
use crate::storage::Storage;

use super::expense::validate_amount;

/// Spending in one category over a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Money,
}

/// Service for budget limits and spending totals
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The three limit rows in day, week, month order
    pub fn limits(&self) -> BookkeeperResult<Vec<BudgetLimit>> {
        Period::all()
            .iter()
            .map(|period| self.limit(*period))
            .collect()
    }

    pub fn limit(&self, period: Period) -> BookkeeperResult<BudgetLimit> {
        self.storage
            .budget_limits
            .get(period)?
            .ok_or_else(|| BookkeeperError::budget_limit_not_found(period.name()))
    }

    /// Total spent in `period` as of `now`, zero when nothing qualifies
    ///
    /// The result is stored as the period's `spent` value.
    pub fn spend_for_period(
        &self,
        period: Period,
        now: NaiveDateTime,
    ) -> BookkeeperResult<Money> {
        let (start, end) = period.window(now);
        let spent = self.storage.sum_amount_in_range(start, end)?;

        if self.limit(period)?.spent != spent {
            let (before, after) = self
                .storage
                .budget_limits
                .update(period, |l| l.spent = spent)?;
            self.storage.save_all()?;
            self.storage.log_update(&before, &after)?;
        }

        tracing::debug!(%period, %spent, "computed period spending");
        Ok(spent)
    }

    /// Spending in `period` per category name, ordered by name
    pub fn spend_by_category(
        &self,
        period: Period,
        now: NaiveDateTime,
    ) -> BookkeeperResult<Vec<CategorySpend>> {
        let (start, end) = period.window(now);
        Ok(self
            .storage
            .sum_amount_in_range_by_category(start, end)?
            .into_iter()
            .map(|(category, amount)| CategorySpend { category, amount })
            .collect())
    }

    /// Recompute spending for every period and return the limit rows
    pub fn refresh(&self, now: NaiveDateTime) -> BookkeeperResult<Vec<BudgetLimit>> {
        self.storage.transaction(|_| {
            for period in Period::all() {
                self.spend_for_period(*period, now)?;
            }
            Ok(())
        })?;
        self.limits()
    }

    /// Set all three limits from raw text
    ///
    /// Every value is validated before any limit is written.
    pub fn set_limits(
        &self,
        day: &str,
        week: &str,
        month: &str,
    ) -> BookkeeperResult<Vec<BudgetLimit>> {
        let values = [
            (Period::Day, validate_amount("Day limit", day)?),
            (Period::Week, validate_amount("Week limit", week)?),
            (Period::Month, validate_amount("Month limit", month)?),
        ];

        self.storage.transaction(|store| {
            for (period, limit) in values {
                let (before, after) = store.budget_limits.update(period, |l| l.limit = limit)?;
                if before != after {
                    store.log_update(&before, &after)?;
                }
            }
            Ok(())
        })?;

        tracing::info!(
            day = %values[0].1,
            week = %values[1].1,
            month = %values[2].1,
            "budget limits set"
        );
        self.limits()
    }
}
