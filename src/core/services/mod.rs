pub mod budget_service;
pub mod investment_service;
pub mod movement_service;
pub mod summary_service;

pub use budget_service::BudgetService;
pub use investment_service::InvestmentService;
pub use movement_service::MovementService;
pub use summary_service::{
    BudgetOverview, DashboardView, ExpenseOverview, IncomeOverview, MonthlyReport, ReportContext,
    SummaryService,
};

use tracing::error;

use crate::store::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Invalid(String),
}

/// Logs a failed write the way callers report them, then hands the error back.
pub(crate) fn logged<T>(operation: &str, result: Result<T, StoreError>) -> ServiceResult<T> {
    result.map_err(|err| {
        error!(operation, %err, "store write failed");
        ServiceError::from(err)
    })
}

pub(crate) fn require_finite(field: &str, amount: f64) -> ServiceResult<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ServiceError::Invalid(format!("{field} must be a number")))
    }
}

#[cfg(test)]
mod tests;
