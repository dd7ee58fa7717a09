//! Domain records: movements, budgets, investments and the month keys that
//! file them.

pub mod budget;
pub mod category;
pub mod common;
pub mod investment;
pub mod month;
pub mod movement;

pub use budget::{CategoryBudget, MonthlyBudget};
pub use category::{default_categories, DEFAULT_EXPENSE_CATEGORIES};
pub use common::{parse_amount, sum_amounts, Amounted, Dated, Displayable, Identifiable};
pub use investment::{Investment, InvestmentEdit, InvestmentKind};
pub use month::{MonthKey, MonthKeyError};
pub use movement::{Movement, MovementDraft, MovementEdit, MovementId, MovementKind};
