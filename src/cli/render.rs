//! Text renderings of the summary view models.

use colored::Colorize;

use crate::cli::output::{current_preferences, status_text};
use crate::cli::table::{Table, TableColumn};
use crate::core::budget_evaluator::UsageStatus;
use crate::core::services::{
    BudgetOverview, DashboardView, ExpenseOverview, IncomeOverview, MonthlyReport,
};
use crate::core::services::investment_service::KindTotal;
use crate::domain::{Amounted, Dated, Displayable, Investment, Movement};

const BAR_WIDTH: usize = 20;

/// Formats an amount with the configured currency symbol, sign first.
pub fn money(symbol: &str, amount: f64) -> String {
    if amount.is_nan() {
        return format!("{symbol}NaN");
    }
    if amount < 0.0 {
        format!("-{symbol}{:.2}", -amount)
    } else {
        format!("{symbol}{amount:.2}")
    }
}

/// A fixed-width usage bar. Anything outside 0..=100 is pinned to the ends.
pub fn percent_bar(percent: f64, status: UsageStatus) -> String {
    let filled = if percent.is_nan() || percent <= 0.0 {
        0
    } else {
        ((percent.min(100.0) / 100.0) * BAR_WIDTH as f64).round() as usize
    };
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
    if current_preferences().plain {
        return format!("[{bar}]");
    }
    let colored = match status {
        UsageStatus::Ok => bar.green(),
        UsageStatus::Warning => bar.yellow(),
        UsageStatus::Exceeded => bar.red(),
    };
    format!("[{colored}]")
}

fn movement_date(movement: &Movement, format: &str) -> String {
    movement
        .date()
        .map(|date| date.format(format).to_string())
        .unwrap_or_else(|| "-".into())
}

fn movement_table(movements: &[Movement], symbol: &str, date_format: &str) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Description"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
    ]);
    for movement in movements {
        table.push(vec![
            movement_date(movement, date_format),
            movement.description().to_string(),
            movement.category().unwrap_or("-").to_string(),
            money(symbol, movement.amount()),
        ]);
    }
    table
}

pub fn dashboard(view: &DashboardView, symbol: &str) -> String {
    let mut out = vec![
        format!("Income:  {}", money(symbol, view.totals.income)),
        format!("Expense: {}", money(symbol, view.totals.expense)),
        format!("Balance: {}", money(symbol, view.totals.balance())),
    ];
    let mut daily = Table::new(vec![
        TableColumn::left("Day"),
        TableColumn::right("Income"),
        TableColumn::right("Expense"),
    ]);
    for bucket in &view.daily {
        daily.push(vec![
            bucket.label.clone(),
            money(symbol, bucket.income),
            money(symbol, bucket.expense),
        ]);
    }
    out.push(String::new());
    out.push(daily.render());
    out.join("\n")
}

pub fn monthly_report(report: &MonthlyReport, symbol: &str, date_format: &str) -> String {
    let mut out = vec![
        format!("Month:   {}", report.month),
        format!("Income:  {}", money(symbol, report.totals.income)),
        format!("Expense: {}", money(symbol, report.totals.expense)),
        format!("Balance: {}", money(symbol, report.balance)),
        String::new(),
    ];
    let mut categories = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Total"),
    ]);
    for entry in &report.by_category {
        categories.push(vec![entry.category.clone(), money(symbol, entry.total)]);
    }
    out.push(categories.render());
    out.push(String::new());
    out.push("Top expenses".into());
    out.push(movement_table(&report.top_expenses, symbol, date_format).render());
    out.join("\n")
}

pub fn budget_overview(view: &BudgetOverview, symbol: &str) -> String {
    let mut out = vec![format!("Month: {}", view.month)];
    match &view.monthly {
        Some(usage) => {
            out.push(format!(
                "Monthly budget {}  balance {}  used {}",
                money(symbol, usage.budget),
                money(symbol, usage.balance),
                money(symbol, usage.used_amount),
            ));
            out.push(format!(
                "{} {:.1}% {}",
                percent_bar(usage.percent_used, usage.status),
                usage.percent_used,
                status_text(usage.status),
            ));
        }
        None => out.push("No monthly budget set.".into()),
    }
    if view.categories.is_empty() {
        out.push("No category budgets set.".into());
        return out.join("\n");
    }
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Budget"),
        TableColumn::right("Spent"),
        TableColumn::right("Remaining"),
        TableColumn::left("Usage"),
        TableColumn::right("%"),
        TableColumn::left("Status"),
    ]);
    for line in &view.categories {
        let usage = &line.usage;
        table.push(vec![
            line.category.clone(),
            money(symbol, usage.budget),
            money(symbol, usage.spend),
            money(symbol, usage.remaining),
            percent_bar(usage.percent_used, usage.status),
            format!("{:.1}", usage.percent_used),
            status_text(usage.status),
        ]);
    }
    out.push(String::new());
    out.push(table.render());
    out.join("\n")
}

pub fn expense_overview(view: &ExpenseOverview, symbol: &str, date_format: &str) -> String {
    let mut out = vec![format!("Total expenses: {}", money(symbol, view.total))];
    for entry in &view.by_category {
        out.push(format!("  {:<12} {}", entry.category, money(symbol, entry.total)));
    }
    out.push(String::new());
    out.push(movement_table(&view.expenses, symbol, date_format).render());
    out.join("\n")
}

pub fn income_overview(view: &IncomeOverview, symbol: &str, date_format: &str) -> String {
    [
        format!("Total income: {}", money(symbol, view.total)),
        String::new(),
        movement_table(&view.incomes, symbol, date_format).render(),
    ]
    .join("\n")
}

pub fn investments(
    holdings: &[Investment],
    by_kind: &[KindTotal],
    total: f64,
    symbol: &str,
) -> String {
    let mut out = vec![format!("Total invested: {}", money(symbol, total))];
    for entry in by_kind {
        out.push(format!("  {:<12} {}", entry.kind.to_string(), money(symbol, entry.total)));
    }
    let mut table = Table::new(vec![TableColumn::left("Holding"), TableColumn::right("Amount")]);
    for holding in holdings {
        table.push(vec![holding.display_label(), money(symbol, holding.amount)]);
    }
    out.push(String::new());
    out.push(table.render());
    out.join("\n")
}
