//! Views that stay current by recomputing from every snapshot they receive.
//!
//! A view owns its subscriptions: it is acquired when a screen becomes active
//! and dropping it releases the listeners.

use tracing::debug;

use crate::core::services::{BudgetOverview, ReportContext, SummaryService};
use crate::domain::{CategoryBudget, MonthKey, MonthlyBudget, Movement};
use crate::store::{
    AllRecords, FinanceStore, MonthQuery, Record, SnapshotQuery, StoreError, Subscription,
};

type Projection<T, V> = Box<dyn Fn(&[T]) -> V + Send>;

/// A single-collection subscription paired with the projection that turns each
/// snapshot into a view model.
pub struct LiveView<T: Record, V> {
    subscription: Subscription<T>,
    project: Projection<T, V>,
    current: Option<V>,
}

impl<T: Record, V> LiveView<T, V> {
    pub fn new<F>(subscription: Subscription<T>, project: F) -> Self
    where
        F: Fn(&[T]) -> V + Send + 'static,
    {
        Self {
            subscription,
            project: Box::new(project),
            current: None,
        }
    }

    /// Recomputes from the newest pending snapshot, if any, and returns the
    /// current view.
    pub fn refresh(&mut self) -> Option<&V> {
        if let Some(snapshot) = self.subscription.latest() {
            debug!(records = snapshot.len(), "recomputing view");
            self.current = Some((self.project)(&snapshot));
        }
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&V> {
        self.current.as_ref()
    }
}

impl<T: Record, V: Clone> Iterator for LiveView<T, V> {
    type Item = V;

    /// Blocks for the next snapshot and yields the freshly computed view.
    fn next(&mut self) -> Option<V> {
        let snapshot = self.subscription.next()?;
        let view = (self.project)(&snapshot);
        self.current = Some(view.clone());
        Some(view)
    }
}

/// Builds a [`LiveView`] over the movement collection.
pub fn watch_movements<Q, V, F>(
    store: &FinanceStore,
    query: Q,
    project: F,
) -> Result<LiveView<Movement, V>, StoreError>
where
    Q: SnapshotQuery<Movement> + 'static,
    F: Fn(&[Movement]) -> V + Send + 'static,
{
    Ok(LiveView::new(store.movements().subscribe(query)?, project))
}

/// Budget screen state: three subscriptions whose latest snapshots are
/// combined whenever any of them changes.
pub struct BudgetWatch {
    month: MonthKey,
    ctx: ReportContext,
    movements: Subscription<Movement>,
    monthly: Subscription<MonthlyBudget>,
    categories: Subscription<CategoryBudget>,
    latest_movements: Vec<Movement>,
    latest_monthly: Vec<MonthlyBudget>,
    latest_categories: Vec<CategoryBudget>,
}

impl BudgetWatch {
    pub fn new(
        store: &FinanceStore,
        month: MonthKey,
        ctx: ReportContext,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            month,
            ctx,
            movements: store.movements().subscribe(AllRecords)?,
            monthly: store.monthly_budgets().subscribe(MonthQuery::new(month))?,
            categories: store.category_budgets().subscribe(MonthQuery::new(month))?,
            latest_movements: Vec::new(),
            latest_monthly: Vec::new(),
            latest_categories: Vec::new(),
        })
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    /// Returns a recomputed overview when any collection delivered a new
    /// snapshot since the last call, `None` otherwise.
    pub fn refresh(&mut self) -> Option<BudgetOverview> {
        let mut changed = false;
        if let Some(snapshot) = self.movements.latest() {
            self.latest_movements = snapshot;
            changed = true;
        }
        if let Some(snapshot) = self.monthly.latest() {
            self.latest_monthly = snapshot;
            changed = true;
        }
        if let Some(snapshot) = self.categories.latest() {
            self.latest_categories = snapshot;
            changed = true;
        }
        if !changed {
            return None;
        }
        debug!(month = %self.month, "recomputing budget overview");
        Some(SummaryService::budget_overview(
            &self.latest_movements,
            self.latest_monthly.first(),
            &self.latest_categories,
            self.month,
            &self.ctx,
        ))
    }
}
