//! Expense categories offered when recording expenses and budgets.

/// Categories available out of the box.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 5] =
    ["Food", "Transport", "Home", "Education", "Leisure"];

pub fn default_categories() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .map(|name| name.to_string())
        .collect()
}
