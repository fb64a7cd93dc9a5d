//! Budget formatting
//!
//! The limit table has one column per period and three rows: the limit, what
//! was spent and what remains.

use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetLimit, Money, Period};
use crate::services::CategorySpend;

/// Format the limit / spent / remaining table
pub fn format_budget_table(limits: &[BudgetLimit], currency_symbol: &str) -> String {
    let mut builder = Builder::default();

    let mut header = vec![String::new()];
    header.extend(limits.iter().map(|l| l.period.name().to_string()));
    builder.push_record(header);

    let rows: [(&str, fn(&BudgetLimit) -> Money); 3] = [
        ("Limit", |l| l.limit),
        ("Spent", |l| l.spent),
        ("Remaining", BudgetLimit::remaining),
    ];
    for (label, value) in rows {
        let mut record = vec![label.to_string()];
        record.extend(
            limits
                .iter()
                .map(|l| value(l).format_with_symbol(currency_symbol)),
        );
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::modern());

    let mut output = format!("{}\n", table);
    let over: Vec<_> = limits
        .iter()
        .filter(|l| l.is_over())
        .map(|l| l.period.name())
        .collect();
    if !over.is_empty() {
        output.push_str(&format!("Over budget: {}\n", over.join(", ")));
    }
    output
}

#[derive(Tabled)]
struct SpendLine {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    amount: String,
}

/// Format per-category spending for a period
pub fn format_category_spend(
    rows: &[CategorySpend],
    period: Period,
    currency_symbol: &str,
) -> String {
    if rows.is_empty() {
        return format!("Nothing spent this {}.\n", period);
    }

    let lines = rows.iter().map(|row| SpendLine {
        category: row.category.clone(),
        amount: row.amount.format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(lines);
    table.with(Style::modern());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Vec<BudgetLimit> {
        Period::all()
            .iter()
            .map(|p| BudgetLimit {
                period: *p,
                limit: Money::from_units(50),
                spent: Money::from_units(20),
            })
            .collect()
    }

    #[test]
    fn test_budget_table() {
        let output = format_budget_table(&limits(), "");

        for word in ["day", "week", "month", "Limit", "Spent", "Remaining", "30.00"] {
            assert!(output.contains(word), "missing {word} in\n{output}");
        }
        assert!(!output.contains("Over budget"));
    }

    #[test]
    fn test_over_budget_noted() {
        let mut limits = limits();
        limits[0].spent = Money::from_units(80);

        let output = format_budget_table(&limits, "");
        assert!(output.contains("-30.00"));
        assert!(output.contains("Over budget: day"));
    }

    #[test]
    fn test_category_spend() {
        assert_eq!(
            format_category_spend(&[], Period::Week, ""),
            "Nothing spent this week.\n"
        );

        let rows = vec![CategorySpend {
            category: "Food".into(),
            amount: Money::from_units(12),
        }];
        let output = format_category_spend(&rows, Period::Day, "€");
        assert!(output.contains("Food"));
        assert!(output.contains("€12.00"));
    }
}
