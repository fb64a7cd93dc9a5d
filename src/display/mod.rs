//! Display formatting for terminal output
//!
//! Turns the view models produced by the controller into text tables.

pub mod budget;
pub mod category;
pub mod expense;

pub use budget::{format_budget_table, format_category_spend};
pub use category::{format_category_tree, format_reconcile_report};
pub use expense::format_expense_table;
