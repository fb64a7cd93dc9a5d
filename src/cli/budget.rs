//! Budget CLI commands
//!
//! Shows spending against the day, week and month limits and sets the limits.

use clap::Subcommand;

use crate::controller::Controller;
use crate::display::{format_budget_table, format_category_spend};
use crate::error::BookkeeperResult;
use crate::models::Period;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show limits, spending and today's spending per category
    Show,

    /// Set budget limits; omitted periods keep their current limit
    Set {
        /// Daily limit
        #[arg(long, allow_hyphen_values = true)]
        day: Option<String>,
        /// Limit for the trailing 7 days
        #[arg(long, allow_hyphen_values = true)]
        week: Option<String>,
        /// Limit for the trailing 30 days
        #[arg(long, allow_hyphen_values = true)]
        month: Option<String>,
    },

    /// Show spending per category
    #[command(name = "by-category")]
    ByCategory {
        /// day, week or month
        #[arg(short, long, default_value = "day")]
        period: Period,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    controller: &Controller,
    cmd: BudgetCommands,
) -> BookkeeperResult<()> {
    let symbol = &controller.settings().currency_symbol;

    match cmd {
        BudgetCommands::Show => {
            let snapshot = controller.refresh()?;
            print!("{}", format_budget_table(&snapshot.budget, symbol));
            println!();
            print!(
                "{}",
                format_category_spend(&snapshot.category_spend, Period::Day, symbol)
            );
        }

        BudgetCommands::Set { day, week, month } => {
            let current = controller.refresh()?.budget;
            let value = |raw: Option<String>, period: Period| {
                raw.unwrap_or_else(|| {
                    current
                        .iter()
                        .find(|l| l.period == period)
                        .map(|l| l.limit.to_string())
                        .unwrap_or_default()
                })
            };

            let snapshot = controller.on_budget_change(
                &value(day, Period::Day),
                &value(week, Period::Week),
                &value(month, Period::Month),
            )?;
            print!("{}", format_budget_table(&snapshot.budget, symbol));
        }

        BudgetCommands::ByCategory { period } => {
            let rows = controller.on_category_spend(period)?;
            print!("{}", format_category_spend(&rows, period, symbol));
        }
    }

    Ok(())
}
