use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{sum_amounts, Investment, InvestmentEdit, InvestmentKind};
use crate::store::{DateOrder, FinanceStore};

use super::{logged, require_finite, ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindTotal {
    pub kind: InvestmentKind,
    pub total: f64,
}

pub struct InvestmentService;

impl InvestmentService {
    pub fn add(
        store: &FinanceStore,
        name: &str,
        amount: f64,
        kind: InvestmentKind,
    ) -> ServiceResult<Uuid> {
        Self::add_at(store, name, amount, kind, Utc::now())
    }

    pub fn add_at(
        store: &FinanceStore,
        name: &str,
        amount: f64,
        kind: InvestmentKind,
        date: DateTime<Utc>,
    ) -> ServiceResult<Uuid> {
        Self::validate(name, amount)?;
        logged(
            "add investment",
            store
                .investments()
                .insert(Investment::new(name.trim(), amount, kind, date)),
        )
    }

    pub fn edit(store: &FinanceStore, id: Uuid, edit: InvestmentEdit) -> ServiceResult<Investment> {
        Self::validate(&edit.name, edit.amount)?;
        logged(
            "edit investment",
            store.investments().update(&id, |investment| investment.apply_edit(&edit)),
        )
    }

    pub fn remove(store: &FinanceStore, id: Uuid) -> ServiceResult<()> {
        logged("remove investment", store.investments().remove(&id)).map(|_| ())
    }

    /// Newest first, as the holdings table shows them.
    pub fn list(store: &FinanceStore) -> ServiceResult<Vec<Investment>> {
        Ok(store.investments().query(&DateOrder::NewestFirst)?)
    }

    pub fn total(investments: &[Investment]) -> f64 {
        sum_amounts(investments)
    }

    /// Totals per kind in [`InvestmentKind::ALL`] order, skipping empty kinds.
    pub fn totals_by_kind(investments: &[Investment]) -> Vec<KindTotal> {
        InvestmentKind::ALL
            .iter()
            .filter_map(|kind| {
                let held: Vec<&Investment> =
                    investments.iter().filter(|i| i.kind == *kind).collect();
                if held.is_empty() {
                    return None;
                }
                Some(KindTotal {
                    kind: *kind,
                    total: sum_amounts(held),
                })
            })
            .collect()
    }

    fn validate(name: &str, amount: f64) -> ServiceResult<()> {
        if name.trim().is_empty() {
            return Err(ServiceError::Invalid("Investment name cannot be empty".into()));
        }
        require_finite("Investment amount", amount)
    }
}
