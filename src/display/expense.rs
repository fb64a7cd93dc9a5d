//! Expense table formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::ExpenseRow;

#[derive(Tabled)]
struct ExpenseLine {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Comment")]
    comment: String,
}

/// Format expense rows as a table
pub fn format_expense_table(rows: &[ExpenseRow], currency_symbol: &str) -> String {
    if rows.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let lines = rows.iter().map(|row| ExpenseLine {
        id: row.id.short(),
        date: row.date.clone(),
        amount: row.amount.format_with_symbol(currency_symbol),
        category: row.category.clone(),
        comment: row.comment.clone(),
    });

    let mut table = Table::new(lines);
    table.with(Style::modern());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money};

    #[test]
    fn test_empty() {
        assert_eq!(format_expense_table(&[], "$"), "No expenses recorded.\n");
    }

    #[test]
    fn test_rows_rendered() {
        let id = ExpenseId::new();
        let rows = vec![ExpenseRow {
            id,
            date: "01-05-2024 08:30".into(),
            amount: Money::from_cents(4210),
            category: "Groceries".into(),
            comment: "weekly shop".into(),
        }];

        let output = format_expense_table(&rows, "$");
        assert!(output.contains(&id.short()));
        assert!(output.contains("$42.10"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("Comment"));
    }
}
