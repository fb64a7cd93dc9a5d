//! Expense CLI commands

use clap::Subcommand;

use crate::controller::Controller;
use crate::display::{format_budget_table, format_expense_table};
use crate::error::BookkeeperResult;
use crate::services::ExpenseForm;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List all expenses
    List,

    /// Record a new expense
    Add {
        /// Amount (e.g., "12" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Date in the configured format; now when omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form comment
        #[arg(short = 'm', long)]
        comment: Option<String>,
    },

    /// Change one field of an expense
    Edit {
        /// Expense ID (full, short form or a prefix)
        id: String,
        /// Field to change: date, amount, category or comment
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Delete one or more expenses
    Delete {
        /// Expense IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    controller: &Controller,
    cmd: ExpenseCommands,
) -> BookkeeperResult<()> {
    let symbol = &controller.settings().currency_symbol;

    match cmd {
        ExpenseCommands::List => {
            let snapshot = controller.refresh()?;
            print!("{}", format_expense_table(&snapshot.expenses, symbol));
        }

        ExpenseCommands::Add {
            amount,
            category,
            date,
            comment,
        } => {
            let form = ExpenseForm {
                date: date.unwrap_or_default(),
                amount,
                category,
                comment: comment.unwrap_or_default(),
            };
            let snapshot = controller.on_expense_add(&form)?;
            println!("Expense added.");
            print!("{}", format_budget_table(&snapshot.budget, symbol));
        }

        ExpenseCommands::Edit { id, field, value } => {
            controller.on_expense_edit(&id, &field, &value)?;
            println!("Expense {} updated.", id);
        }

        ExpenseCommands::Delete { ids } => {
            let (removed, _) = controller.on_expense_delete(&ids)?;
            println!("Deleted {} expense(s).", removed);
        }
    }

    Ok(())
}
