//! Income and expense movements.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Amounted, Dated, Displayable, Identifiable};

pub type MovementId = Uuid;

/// The two kinds of movement a user can record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MovementKind {
    Income,
    Expense,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MovementKind::Income => "Income",
            MovementKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// A single recorded income or expense event. Only expenses carry a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Movement {
    Income {
        id: MovementId,
        description: String,
        amount: f64,
        #[serde(default)]
        date: Option<DateTime<Utc>>,
    },
    Expense {
        id: MovementId,
        description: String,
        amount: f64,
        #[serde(default)]
        date: Option<DateTime<Utc>>,
        category: String,
    },
}

impl Movement {
    pub fn income(description: impl Into<String>, amount: f64, date: DateTime<Utc>) -> Self {
        Movement::Income {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            date: Some(date),
        }
    }

    pub fn expense(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Movement::Expense {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            date: Some(date),
            category: category.into(),
        }
    }

    pub fn kind(&self) -> MovementKind {
        match self {
            Movement::Income { .. } => MovementKind::Income,
            Movement::Expense { .. } => MovementKind::Expense,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Movement::Income { description, .. } | Movement::Expense { description, .. } => {
                description
            }
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Movement::Income { .. } => None,
            Movement::Expense { category, .. } => Some(category),
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Movement::Expense { .. })
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Movement::Income { .. })
    }

    /// Overwrites the editable fields. The category is only applied to
    /// expenses; income never gains one.
    pub fn apply_edit(&mut self, edit: &MovementEdit) {
        match self {
            Movement::Income {
                description,
                amount,
                ..
            } => {
                *description = edit.description.clone();
                *amount = edit.amount;
            }
            Movement::Expense {
                description,
                amount,
                category,
                ..
            } => {
                *description = edit.description.clone();
                *amount = edit.amount;
                if let Some(next) = &edit.category {
                    *category = next.clone();
                }
            }
        }
    }
}

impl Identifiable for Movement {
    fn id(&self) -> Uuid {
        match self {
            Movement::Income { id, .. } | Movement::Expense { id, .. } => *id,
        }
    }
}

impl Amounted for Movement {
    fn amount(&self) -> f64 {
        match self {
            Movement::Income { amount, .. } | Movement::Expense { amount, .. } => *amount,
        }
    }
}

impl Dated for Movement {
    fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Movement::Income { date, .. } | Movement::Expense { date, .. } => *date,
        }
    }
}

impl Displayable for Movement {
    fn display_label(&self) -> String {
        match self.category() {
            Some(category) => format!("{} [{}]", self.description(), category),
            None => self.description().to_string(),
        }
    }
}

/// Form submission for a new movement. `category` is required for expenses
/// and discarded for income.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementDraft {
    pub description: String,
    pub kind: MovementKind,
    pub amount: f64,
    pub category: Option<String>,
}

/// Full-field overwrite applied when a movement is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementEdit {
    pub description: String,
    pub amount: f64,
    pub category: Option<String>,
}
