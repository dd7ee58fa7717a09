//! Classifies spend against monthly and per-category budgets.

use std::{collections::HashMap, fmt};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Amounted, CategoryBudget, Movement};

/// Usage at or above this percentage is a warning.
pub const WARNING_THRESHOLD: f64 = 80.0;
/// Usage at or above this percentage means the budget is spent.
pub const EXCEEDED_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UsageStatus {
    Ok,
    Warning,
    Exceeded,
}

impl UsageStatus {
    /// `NaN` never reaches a threshold and classifies as `Ok`.
    pub fn classify(percent_used: f64) -> Self {
        if percent_used >= EXCEEDED_THRESHOLD {
            UsageStatus::Exceeded
        } else if percent_used >= WARNING_THRESHOLD {
            UsageStatus::Warning
        } else {
            UsageStatus::Ok
        }
    }
}

impl fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UsageStatus::Ok => "OK",
            UsageStatus::Warning => "WARNING",
            UsageStatus::Exceeded => "EXCEEDED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBudgetUsage {
    pub budget: f64,
    pub balance: f64,
    pub used_amount: f64,
    pub percent_used: f64,
    pub remaining: f64,
    pub overrun: f64,
    pub status: UsageStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBudgetUsage {
    pub budget: f64,
    pub spend: f64,
    pub remaining: f64,
    pub percent_used: f64,
    pub overrun: f64,
    pub status: UsageStatus,
}

/// One category budget entry paired with the spend of its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBudgetLine {
    pub id: Uuid,
    pub category: String,
    pub usage: CategoryBudgetUsage,
}

/// Stateless budget usage calculations.
pub struct BudgetEvaluator;

impl BudgetEvaluator {
    /// The monthly budget is consumed by whatever the balance does not cover:
    /// `used = budget - (income - expense)`.
    pub fn evaluate_monthly_budget(budget: f64, income: f64, expense: f64) -> MonthlyBudgetUsage {
        let balance = income - expense;
        let used_amount = budget - balance;
        let percent_used = percent_of(used_amount, budget);
        MonthlyBudgetUsage {
            budget,
            balance,
            used_amount,
            percent_used,
            remaining: budget - used_amount,
            overrun: (used_amount - budget).max(0.0),
            status: UsageStatus::classify(percent_used),
        }
    }

    pub fn evaluate_category_budget(budget: f64, spend: f64) -> CategoryBudgetUsage {
        let percent_used = percent_of(spend, budget);
        CategoryBudgetUsage {
            budget,
            spend,
            remaining: budget - spend,
            percent_used,
            overrun: (spend - budget).max(0.0),
            status: UsageStatus::classify(percent_used),
        }
    }

    /// Evaluates every entry, duplicates included, in stored order. Spend per
    /// category is taken from the expenses in `movements`, which callers
    /// restrict to the budget month beforehand.
    pub fn evaluate_category_budgets(
        budgets: &[CategoryBudget],
        movements: &[Movement],
    ) -> Vec<CategoryBudgetLine> {
        let mut spend: HashMap<&str, f64> = HashMap::new();
        for movement in movements {
            if let Some(category) = movement.category() {
                *spend.entry(category).or_insert(0.0) += movement.amount();
            }
        }
        budgets
            .iter()
            .map(|budget| CategoryBudgetLine {
                id: budget.id,
                category: budget.category.clone(),
                usage: Self::evaluate_category_budget(
                    budget.amount(),
                    spend.get(budget.category.as_str()).copied().unwrap_or(0.0),
                ),
            })
            .collect()
    }
}

/// Percentage of `budget` taken by `used`, capped at 100. A budget that is not
/// strictly positive reports 0 instead of dividing.
fn percent_of(used: f64, budget: f64) -> f64 {
    if budget.is_nan() || budget <= 0.0 {
        return 0.0;
    }
    let percent = used / budget * 100.0;
    // written as a comparison so NaN passes through instead of becoming 100
    if percent > EXCEEDED_THRESHOLD {
        EXCEEDED_THRESHOLD
    } else {
        percent
    }
}
