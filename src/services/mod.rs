//! Service layer for Bookkeeper
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-record operations.

pub mod budget;
pub mod category;
pub mod category_tree;
pub mod clock;
pub mod expense;

pub use budget::{BudgetService, CategorySpend};
pub use category::{CategoryService, ReconcileReport};
pub use category_tree::{parse_tree, render_tree, ParsedCategory};
pub use clock::{Clock, FixedClock, SystemClock};
pub use expense::{
    validate_amount, validate_category, validate_date, EditableField, ExpenseForm, ExpenseRow,
    ExpenseService,
};
