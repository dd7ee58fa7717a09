//! Builds the view models each screen renders from store snapshots.

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::core::aggregation::{
    AggregationEngine, CategoryTotal, ChartSlice, DailyAmount, DateBucket, TypeTotals,
    DEFAULT_LABEL_FORMAT,
};
use crate::core::budget_evaluator::{BudgetEvaluator, CategoryBudgetLine, MonthlyBudgetUsage};
use crate::domain::{
    default_categories, CategoryBudget, Dated, MonthKey, MonthlyBudget, Movement, MovementKind,
};
use crate::errors::Result;

/// Calendar and display settings shared by every view.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub time_zone: FixedOffset,
    pub label_format: String,
    pub categories: Vec<String>,
    pub top_limit: usize,
}

impl Default for ReportContext {
    fn default() -> Self {
        Self {
            time_zone: Utc.fix(),
            label_format: DEFAULT_LABEL_FORMAT.into(),
            categories: default_categories(),
            top_limit: 5,
        }
    }
}

impl ReportContext {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            time_zone: config.time_zone()?,
            label_format: config.label_format()?.to_string(),
            categories: config.expense_categories.clone(),
            top_limit: config.top_expenses,
        })
    }

    pub fn current_month(&self) -> MonthKey {
        MonthKey::current(&self.time_zone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub totals: TypeTotals,
    pub split: Vec<ChartSlice>,
    pub daily: Vec<DateBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub month: MonthKey,
    pub totals: TypeTotals,
    pub balance: f64,
    pub by_category: Vec<CategoryTotal>,
    pub top_expenses: Vec<Movement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseOverview {
    pub expenses: Vec<Movement>,
    pub total: f64,
    pub by_category: Vec<CategoryTotal>,
    pub daily: Vec<DailyAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeOverview {
    pub incomes: Vec<Movement>,
    pub total: f64,
    pub daily: Vec<DailyAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub month: MonthKey,
    pub totals: TypeTotals,
    pub monthly: Option<MonthlyBudgetUsage>,
    pub categories: Vec<CategoryBudgetLine>,
}

pub struct SummaryService;

impl SummaryService {
    /// All-time totals, the income/expense split and the per-day series.
    pub fn dashboard(movements: &[Movement], ctx: &ReportContext) -> DashboardView {
        let totals = AggregationEngine::totals_by_type(movements);
        DashboardView {
            split: AggregationEngine::type_split(&totals),
            daily: AggregationEngine::bucket_by_date(movements, &ctx.time_zone, &ctx.label_format),
            totals,
        }
    }

    pub fn monthly_report(
        movements: &[Movement],
        month: MonthKey,
        ctx: &ReportContext,
    ) -> MonthlyReport {
        let in_month = Self::movements_in(movements, month, ctx);
        let totals = AggregationEngine::totals_by_type(&in_month);
        MonthlyReport {
            month,
            balance: totals.balance(),
            totals,
            by_category: AggregationEngine::group_expenses_by_category(&in_month),
            top_expenses: AggregationEngine::top_n(&in_month, ctx.top_limit),
        }
    }

    pub fn expense_overview(movements: &[Movement], ctx: &ReportContext) -> ExpenseOverview {
        let expenses: Vec<Movement> = movements
            .iter()
            .filter(|movement| movement.is_expense())
            .cloned()
            .collect();
        ExpenseOverview {
            total: AggregationEngine::totals_by_type(&expenses).expense,
            by_category: AggregationEngine::bucket_by_category(&expenses, &ctx.categories),
            daily: AggregationEngine::bucket_kind_by_date(
                &expenses,
                MovementKind::Expense,
                &ctx.time_zone,
                &ctx.label_format,
            ),
            expenses,
        }
    }

    /// Income listing. Records without a date are left out entirely, totals
    /// included.
    pub fn income_overview(movements: &[Movement], ctx: &ReportContext) -> IncomeOverview {
        let incomes: Vec<Movement> = movements
            .iter()
            .filter(|movement| movement.is_income() && movement.date().is_some())
            .cloned()
            .collect();
        IncomeOverview {
            total: AggregationEngine::totals_by_type(&incomes).income,
            daily: AggregationEngine::bucket_kind_by_date(
                &incomes,
                MovementKind::Income,
                &ctx.time_zone,
                &ctx.label_format,
            ),
            incomes,
        }
    }

    /// Usage of the month's budgets. `monthly` is evaluated only when a budget
    /// exists for the month; category entries are filtered to the month here.
    pub fn budget_overview(
        movements: &[Movement],
        monthly: Option<&MonthlyBudget>,
        category_budgets: &[CategoryBudget],
        month: MonthKey,
        ctx: &ReportContext,
    ) -> BudgetOverview {
        let in_month = Self::movements_in(movements, month, ctx);
        let totals = AggregationEngine::totals_by_type(&in_month);
        let month_budgets: Vec<CategoryBudget> = category_budgets
            .iter()
            .filter(|budget| budget.month == month)
            .cloned()
            .collect();
        BudgetOverview {
            month,
            monthly: monthly
                .filter(|budget| budget.month == month)
                .map(|budget| {
                    BudgetEvaluator::evaluate_monthly_budget(
                        budget.amount,
                        totals.income,
                        totals.expense,
                    )
                }),
            categories: BudgetEvaluator::evaluate_category_budgets(&month_budgets, &in_month),
            totals,
        }
    }

    fn movements_in(movements: &[Movement], month: MonthKey, ctx: &ReportContext) -> Vec<Movement> {
        AggregationEngine::filter_by_month(movements, month.year(), month.month(), &ctx.time_zone)
    }
}
