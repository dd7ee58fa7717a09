use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::{Amounted, Identifiable},
    month::MonthKey,
};

/// Spending ceiling for a whole month. One per month; writing the same month
/// again replaces the amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyBudget {
    pub month: MonthKey,
    pub amount: f64,
}

impl MonthlyBudget {
    pub fn new(month: MonthKey, amount: f64) -> Self {
        Self { month, amount }
    }
}

impl Amounted for MonthlyBudget {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Spending ceiling for one category in one month. Entries are appended, so a
/// month may hold several entries for the same category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    pub id: Uuid,
    pub month: MonthKey,
    pub category: String,
    pub amount: f64,
}

impl CategoryBudget {
    pub fn new(month: MonthKey, category: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            month,
            category: category.into(),
            amount,
        }
    }
}

impl Identifiable for CategoryBudget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for CategoryBudget {
    fn amount(&self) -> f64 {
        self.amount
    }
}
