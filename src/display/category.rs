//! Category display formatting

use crate::services::ReconcileReport;

/// Format the tree text for the terminal
pub fn format_category_tree(tree_text: &str) -> String {
    if tree_text.trim().is_empty() {
        return "No categories yet.\n\nRun 'bookkeeper category commit' to define them."
            .to_string();
    }
    format!("{}\n", tree_text)
}

/// Summarise what a tree replacement did
pub fn format_reconcile_report(report: &ReconcileReport) -> String {
    let mut output = format!(
        "Saved {} categories. {} expenses kept their category",
        report.categories_written, report.expenses_remapped
    );
    if report.expenses_orphaned > 0 {
        output.push_str(&format!(
            ", {} moved to \"Not stated\"",
            report.expenses_orphaned
        ));
    }
    output.push_str(".\n");

    if !report.names_removed.is_empty() {
        output.push_str(&format!("Removed: {}\n", report.names_removed.join(", ")));
    }
    output
}
