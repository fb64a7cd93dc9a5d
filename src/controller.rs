//! Application controller
//!
//! The controller sits between a view and the services. A view calls one of
//! the `on_*` intent handlers with the raw text the user entered and gets back
//! a fresh [`Snapshot`] to display. The controller never keeps records of its
//! own: every snapshot is re-read from storage after the mutation.

use crate::config::settings::Settings;
use crate::error::BookkeeperResult;
use crate::models::{BudgetLimit, Period};
use crate::services::{
    BudgetService, CategoryService, CategorySpend, Clock, EditableField, ExpenseForm, ExpenseRow,
    ExpenseService, ReconcileReport,
};
use crate::storage::Storage;

/// Everything a view shows, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Expense table rows ordered by date
    pub expenses: Vec<ExpenseRow>,
    /// Limit and spending for day, week and month
    pub budget: Vec<BudgetLimit>,
    /// Today's spending per category
    pub category_spend: Vec<CategorySpend>,
    /// Names offered when picking an expense category
    pub category_names: Vec<String>,
    /// The category tree as editable text
    pub category_tree: String,
}

pub struct Controller<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    clock: &'a dyn Clock,
}

impl<'a> Controller<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, clock: &'a dyn Clock) -> Self {
        Self {
            storage,
            settings,
            clock,
        }
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    fn expenses(&self) -> ExpenseService<'a> {
        ExpenseService::new(self.storage, &self.settings.date_format)
    }

    fn categories(&self) -> CategoryService<'a> {
        CategoryService::new(self.storage)
    }

    fn budget(&self) -> BudgetService<'a> {
        BudgetService::new(self.storage)
    }

    /// Recompute budget spending and re-read everything
    pub fn refresh(&self) -> BookkeeperResult<Snapshot> {
        let now = self.clock.now();
        let budget = self.budget().refresh(now)?;

        Ok(Snapshot {
            expenses: self.expenses().rows()?,
            budget,
            category_spend: self.budget().spend_by_category(Period::Day, now)?,
            category_names: self.categories().names()?,
            category_tree: self.categories().tree_text()?,
        })
    }

    /// The user replaced the category tree text
    pub fn on_category_commit(
        &self,
        text: &str,
    ) -> BookkeeperResult<(ReconcileReport, Snapshot)> {
        let report = self
            .categories()
            .reconcile(text, self.settings.indent_width)?;
        Ok((report, self.refresh()?))
    }

    /// The user submitted a new expense; a blank date means now
    pub fn on_expense_add(&self, form: &ExpenseForm) -> BookkeeperResult<Snapshot> {
        if form.date.trim().is_empty() {
            let form = ExpenseForm {
                date: self
                    .clock
                    .now()
                    .format(&self.settings.date_format)
                    .to_string(),
                ..form.clone()
            };
            self.expenses().add(&form)?;
        } else {
            self.expenses().add(form)?;
        }
        self.refresh()
    }

    /// The user edited one cell of the expense table
    pub fn on_expense_edit(
        &self,
        id: &str,
        field: &str,
        value: &str,
    ) -> BookkeeperResult<Snapshot> {
        let field: EditableField = field.parse()?;
        self.expenses().update_field(id, field, value)?;
        self.refresh()
    }

    /// The user deleted one or more expenses; also returns how many went
    pub fn on_expense_delete(&self, ids: &[String]) -> BookkeeperResult<(usize, Snapshot)> {
        let removed = self.expenses().delete(ids)?;
        Ok((removed.len(), self.refresh()?))
    }

    /// The user changed the budget limits
    pub fn on_budget_change(
        &self,
        day: &str,
        week: &str,
        month: &str,
    ) -> BookkeeperResult<Snapshot> {
        self.budget().set_limits(day, week, month)?;
        self.refresh()
    }

    /// The user asked for per-category spending over `period`
    pub fn on_category_spend(&self, period: Period) -> BookkeeperResult<Vec<CategorySpend>> {
        self.budget().spend_by_category(period, self.clock.now())
    }
}
