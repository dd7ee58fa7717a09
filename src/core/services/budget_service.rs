//! Stores monthly and per-category budgets.

use uuid::Uuid;

use crate::domain::{CategoryBudget, MonthKey, MonthlyBudget};
use crate::store::{FinanceStore, MonthQuery};

use super::{logged, require_finite, ServiceError, ServiceResult};

pub struct BudgetService;

impl BudgetService {
    /// Sets the budget of a month, overwriting any previous amount. Returns
    /// `true` when an earlier budget was replaced.
    pub fn set_monthly_budget(
        store: &FinanceStore,
        month: MonthKey,
        amount: f64,
    ) -> ServiceResult<bool> {
        require_finite("Budget amount", amount)?;
        logged(
            "set monthly budget",
            store.monthly_budgets().upsert(MonthlyBudget::new(month, amount)),
        )
    }

    /// Appends a category budget. Adding the same category twice for a month
    /// keeps both entries.
    pub fn add_category_budget(
        store: &FinanceStore,
        month: MonthKey,
        category: &str,
        amount: f64,
    ) -> ServiceResult<Uuid> {
        require_finite("Budget amount", amount)?;
        if category.trim().is_empty() {
            return Err(ServiceError::Invalid("Category cannot be empty".into()));
        }
        logged(
            "add category budget",
            store
                .category_budgets()
                .insert(CategoryBudget::new(month, category.trim(), amount)),
        )
    }

    pub fn monthly_budget(
        store: &FinanceStore,
        month: MonthKey,
    ) -> ServiceResult<Option<MonthlyBudget>> {
        Ok(store.monthly_budgets().get(&month)?)
    }

    pub fn category_budgets(
        store: &FinanceStore,
        month: MonthKey,
    ) -> ServiceResult<Vec<CategoryBudget>> {
        Ok(store.category_budgets().query(&MonthQuery::new(month))?)
    }
}
