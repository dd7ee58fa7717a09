//! Investment holdings tracked alongside movements.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Amounted, Dated, Displayable, Identifiable};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InvestmentKind {
    Stocks,
    Crypto,
    RealEstate,
    Funds,
    Other,
}

impl InvestmentKind {
    pub const ALL: [InvestmentKind; 5] = [
        InvestmentKind::Stocks,
        InvestmentKind::Crypto,
        InvestmentKind::RealEstate,
        InvestmentKind::Funds,
        InvestmentKind::Other,
    ];
}

impl fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvestmentKind::Stocks => "Stocks",
            InvestmentKind::Crypto => "Crypto",
            InvestmentKind::RealEstate => "Real Estate",
            InvestmentKind::Funds => "Funds",
            InvestmentKind::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Investment {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub kind: InvestmentKind,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Investment {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        kind: InvestmentKind,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            kind,
            date: Some(date),
        }
    }

    pub fn apply_edit(&mut self, edit: &InvestmentEdit) {
        self.name = edit.name.clone();
        self.amount = edit.amount;
        self.kind = edit.kind;
    }
}

impl Identifiable for Investment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Investment {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Investment {
    fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }
}

impl Displayable for Investment {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentEdit {
    pub name: String,
    pub amount: f64,
    pub kind: InvestmentKind,
}
