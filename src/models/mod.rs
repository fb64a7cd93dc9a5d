//! Core data models for Bookkeeper
//!
//! This module contains the data structures of the bookkeeping domain:
//! categories, expenses, budget limits and the values they are built from.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use budget::BudgetLimit;
pub use category::{Category, CategoryValidationError};
pub use expense::{Expense, ExpensePatch};
pub use ids::{CategoryId, ExpenseId};
pub use money::{Money, MoneyParseError};
pub use period::Period;
