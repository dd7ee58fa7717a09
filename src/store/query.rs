use crate::domain::{CategoryBudget, Dated, MonthKey, MonthlyBudget, Movement, MovementKind};

/// Selects and orders the records a subscriber sees in each snapshot.
pub trait SnapshotQuery<T>: Send {
    fn matches(&self, _record: &T) -> bool {
        true
    }

    fn arrange(&self, _records: &mut Vec<T>) {}

    /// Applies the query to a full collection, cloning the selected records.
    fn select(&self, records: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let mut selected: Vec<T> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        self.arrange(&mut selected);
        selected
    }
}

/// Every record, in stored order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRecords;

impl<T> SnapshotQuery<T> for AllRecords {}

/// Ordering by the record timestamp. Undated records always sort last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    #[default]
    Stored,
    NewestFirst,
    OldestFirst,
}

impl DateOrder {
    pub fn sort<T: Dated>(&self, records: &mut [T]) {
        match self {
            DateOrder::Stored => {}
            // None < Some(_), so descending order already leaves undated records last
            DateOrder::NewestFirst => records.sort_by(|a, b| b.date().cmp(&a.date())),
            DateOrder::OldestFirst => records.sort_by(|a, b| match (a.date(), b.date()) {
                (Some(left), Some(right)) => left.cmp(&right),
                (left, right) => left.is_none().cmp(&right.is_none()),
            }),
        }
    }
}

impl<T: Dated> SnapshotQuery<T> for DateOrder {
    fn arrange(&self, records: &mut Vec<T>) {
        self.sort(records);
    }
}

/// Movement subscription filter: optional equality on kind plus date ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementQuery {
    pub kind: Option<MovementKind>,
    pub order: DateOrder,
}

impl MovementQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_kind(mut self, kind: MovementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = DateOrder::NewestFirst;
        self
    }
}

impl SnapshotQuery<Movement> for MovementQuery {
    fn matches(&self, record: &Movement) -> bool {
        self.kind.map_or(true, |kind| record.kind() == kind)
    }

    fn arrange(&self, records: &mut Vec<Movement>) {
        self.order.sort(records);
    }
}

/// Budget subscription filter: equality on month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthQuery {
    pub month: MonthKey,
}

impl MonthQuery {
    pub fn new(month: MonthKey) -> Self {
        Self { month }
    }
}

impl SnapshotQuery<MonthlyBudget> for MonthQuery {
    fn matches(&self, record: &MonthlyBudget) -> bool {
        record.month == self.month
    }
}

impl SnapshotQuery<CategoryBudget> for MonthQuery {
    fn matches(&self, record: &CategoryBudget) -> bool {
        record.month == self.month
    }
}
