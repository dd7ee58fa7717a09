//! Reactive document store holding movements, budgets and investments.
//!
//! Each collection pushes its full matching snapshot to subscribers after
//! every write; derived views are recomputed from those snapshots.

pub mod collection;
pub mod query;
pub mod snapshot_file;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    CategoryBudget, Identifiable, Investment, MonthKey, MonthlyBudget, Movement,
};

pub use collection::{Collection, Record, Subscription};
pub use query::{AllRecords, DateOrder, MonthQuery, MovementQuery, SnapshotQuery};
pub use snapshot_file::load_snapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} record `{key}` not found")]
    NotFound {
        collection: &'static str,
        key: String,
    },
    #[error("{0} collection lock poisoned")]
    Poisoned(&'static str),
}

impl Record for Movement {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id()
    }
}

impl Record for MonthlyBudget {
    type Key = MonthKey;

    fn key(&self) -> MonthKey {
        self.month
    }
}

impl Record for CategoryBudget {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }
}

impl Record for Investment {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }
}

/// Full content of a store, as exported to or imported from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub movements: Vec<Movement>,
    #[serde(default)]
    pub monthly_budgets: Vec<MonthlyBudget>,
    #[serde(default)]
    pub category_budgets: Vec<CategoryBudget>,
    #[serde(default)]
    pub investments: Vec<Investment>,
}

/// Handles to the four collections of the finance document store.
#[derive(Clone)]
pub struct FinanceStore {
    movements: Collection<Movement>,
    monthly_budgets: Collection<MonthlyBudget>,
    category_budgets: Collection<CategoryBudget>,
    investments: Collection<Investment>,
}

impl Default for FinanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FinanceStore {
    pub fn new() -> Self {
        Self {
            movements: Collection::new("movements"),
            monthly_budgets: Collection::new("monthly_budgets"),
            category_budgets: Collection::new("category_budgets"),
            investments: Collection::new("investments"),
        }
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        let store = Self::new();
        store.movements.replace_all(snapshot.movements)?;
        store.monthly_budgets.replace_all(snapshot.monthly_budgets)?;
        store.category_budgets.replace_all(snapshot.category_budgets)?;
        store.investments.replace_all(snapshot.investments)?;
        Ok(store)
    }

    pub fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        Ok(StoreSnapshot {
            movements: self.movements.snapshot()?,
            monthly_budgets: self.monthly_budgets.snapshot()?,
            category_budgets: self.category_budgets.snapshot()?,
            investments: self.investments.snapshot()?,
        })
    }

    pub fn movements(&self) -> &Collection<Movement> {
        &self.movements
    }

    pub fn monthly_budgets(&self) -> &Collection<MonthlyBudget> {
        &self.monthly_budgets
    }

    pub fn category_budgets(&self) -> &Collection<CategoryBudget> {
        &self.category_budgets
    }

    pub fn investments(&self) -> &Collection<Investment> {
        &self.investments
    }
}
