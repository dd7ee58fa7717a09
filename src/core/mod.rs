pub mod aggregation;
pub mod budget_evaluator;
pub mod live_view;
pub mod services;

pub use aggregation::AggregationEngine;
pub use budget_evaluator::{BudgetEvaluator, UsageStatus};
pub use live_view::{watch_movements, BudgetWatch, LiveView};
