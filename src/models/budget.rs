//! Budget limit model
//!
//! There is exactly one limit row per [`Period`]. `limit` is what the user sets;
//! `spent` is a cache refreshed by the budget service each time spending is
//! computed.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::period::Period;

/// A spending limit for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    /// The period this row covers; also its key
    pub period: Period,

    /// Maximum the user wants to spend in the period
    pub limit: Money,

    /// Last computed spending in the period
    pub spent: Money,
}

impl BudgetLimit {
    /// A zero limit with nothing spent
    pub fn new(period: Period) -> Self {
        Self {
            period,
            limit: Money::zero(),
            spent: Money::zero(),
        }
    }

    /// What is left before the limit is reached (negative when over budget)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_limit_is_zero() {
        let limit = BudgetLimit::new(Period::Week);
        assert_eq!(limit.period, Period::Week);
        assert!(limit.limit.is_zero());
        assert!(limit.spent.is_zero());
        assert!(!limit.is_over());
    }

    #[test]
    fn test_remaining() {
        let mut limit = BudgetLimit::new(Period::Day);
        limit.limit = Money::from_units(1000);
        limit.spent = Money::from_units(1500);

        assert_eq!(limit.remaining(), Money::from_units(-500));
        assert!(limit.is_over());
    }
}
