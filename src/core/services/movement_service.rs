use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::{Displayable, Movement, MovementDraft, MovementEdit, MovementId, MovementKind};
use crate::store::{FinanceStore, MovementQuery};

use super::{logged, ServiceError, ServiceResult};

/// Write side of the movement collection. Amounts are stored as given, `NaN`
/// included; aggregation copes with them.
pub struct MovementService;

impl MovementService {
    pub fn record(store: &FinanceStore, draft: MovementDraft) -> ServiceResult<MovementId> {
        Self::record_at(store, draft, Utc::now())
    }

    pub fn record_at(
        store: &FinanceStore,
        draft: MovementDraft,
        date: DateTime<Utc>,
    ) -> ServiceResult<MovementId> {
        let movement = match draft.kind {
            MovementKind::Income => Movement::Income {
                id: Uuid::new_v4(),
                description: draft.description,
                amount: draft.amount,
                date: Some(date),
            },
            MovementKind::Expense => {
                let category = draft
                    .category
                    .filter(|category| !category.trim().is_empty())
                    .ok_or_else(|| ServiceError::Invalid("Expenses need a category".into()))?;
                Movement::Expense {
                    id: Uuid::new_v4(),
                    description: draft.description,
                    amount: draft.amount,
                    date: Some(date),
                    category,
                }
            }
        };
        logged("record movement", store.movements().insert(movement))
    }

    pub fn edit(
        store: &FinanceStore,
        id: MovementId,
        edit: MovementEdit,
    ) -> ServiceResult<Movement> {
        logged(
            "edit movement",
            store.movements().update(&id, |movement| movement.apply_edit(&edit)),
        )
    }

    pub fn delete(store: &FinanceStore, id: MovementId) -> ServiceResult<()> {
        let removed = logged("delete movement", store.movements().remove(&id))?;
        info!(movement = %removed.display_label(), "deleted movement");
        Ok(())
    }

    pub fn list(store: &FinanceStore, query: MovementQuery) -> ServiceResult<Vec<Movement>> {
        Ok(store.movements().query(&query)?)
    }
}
