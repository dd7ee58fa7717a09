mod common;

use std::{thread, time::Duration};

use finance_core::{
    core::services::{BudgetService, MovementService},
    domain::{Amounted, MonthlyBudget, MovementDraft, MovementEdit, MovementKind},
    store::{
        AllRecords, FinanceStore, MonthQuery, MovementQuery, Record, StoreError, Subscription,
    },
};

fn income(amount: f64) -> MovementDraft {
    MovementDraft {
        description: "Pay".into(),
        kind: MovementKind::Income,
        amount,
        category: None,
    }
}

#[test]
fn subscribe_delivers_current_snapshot_first() {
    let store = FinanceStore::from_snapshot(common::sample_snapshot()).unwrap();
    let subscription = store.movements().subscribe(AllRecords).unwrap();
    let initial = subscription.try_next().expect("initial snapshot");
    assert_eq!(initial.len(), 5);
    assert!(subscription.try_next().is_none());
}

#[test]
fn resubscribing_starts_from_a_fresh_snapshot() {
    let store = FinanceStore::new();
    let first = store.movements().subscribe(AllRecords).unwrap();
    MovementService::record(&store, income(1.0)).unwrap();
    first.unsubscribe();

    let second = store.movements().subscribe(AllRecords).unwrap();
    assert_eq!(second.try_next().map(|s| s.len()), Some(1));
    assert!(second.try_next().is_none());
}

#[test]
fn every_subscriber_sees_each_write() {
    let store = FinanceStore::new();
    let everything = store.movements().subscribe(AllRecords).unwrap();
    let expenses = store
        .movements()
        .subscribe(MovementQuery::all().of_kind(MovementKind::Expense))
        .unwrap();

    MovementService::record(&store, income(50.0)).unwrap();

    let all: Vec<_> = drain(&everything);
    assert_eq!(all.iter().map(Vec::len).collect::<Vec<_>>(), vec![0, 1]);
    let filtered: Vec<_> = drain(&expenses);
    assert_eq!(filtered.iter().map(Vec::len).collect::<Vec<_>>(), vec![0, 0]);
}

#[test]
fn dropped_subscription_is_unregistered() {
    let store = FinanceStore::new();
    {
        let _subscription = store.movements().subscribe(AllRecords).unwrap();
        assert_eq!(store.movements().subscriber_count().unwrap(), 1);
    }
    assert_eq!(store.movements().subscriber_count().unwrap(), 0);
}

#[test]
fn writes_from_another_thread_reach_subscribers() {
    let store = FinanceStore::new();
    let subscription = store
        .monthly_budgets()
        .subscribe(MonthQuery::new(common::march_2024()))
        .unwrap();
    assert_eq!(subscription.try_next().map(|s| s.len()), Some(0));

    let writer = store.clone();
    thread::spawn(move || {
        BudgetService::set_monthly_budget(&writer, common::march_2024(), 750.0).unwrap();
    })
    .join()
    .unwrap();

    let snapshot = subscription
        .next_timeout(Duration::from_secs(1))
        .expect("snapshot after write");
    assert_eq!(snapshot[0].amount, 750.0);
}

#[test]
fn income_edits_never_gain_a_category() {
    let store = FinanceStore::new();
    let id = MovementService::record(&store, income(10.0)).unwrap();
    let edited = MovementService::edit(
        &store,
        id,
        MovementEdit {
            description: "Bonus".into(),
            amount: 25.0,
            category: Some("Food".into()),
        },
    )
    .unwrap();
    assert_eq!(edited.category(), None);
    assert_eq!(edited.amount(), 25.0);
}

#[test]
fn updating_missing_record_is_not_found() {
    let store = FinanceStore::new();
    let err = store
        .monthly_budgets()
        .update(&common::march_2024(), |budget| budget.amount = 1.0)
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(
        err.to_string(),
        "monthly_budgets record `2024-03` not found"
    );
}

#[test]
fn store_snapshot_matches_what_was_imported() {
    let imported = common::sample_snapshot();
    let store = FinanceStore::from_snapshot(imported.clone()).unwrap();
    assert_eq!(store.snapshot().unwrap(), imported);
}

#[test]
fn importing_repeated_monthly_budgets_keeps_the_last() {
    let march = common::march_2024();
    let mut snapshot = common::sample_snapshot();
    snapshot.monthly_budgets = vec![
        MonthlyBudget::new(march, 100.0),
        MonthlyBudget::new(march, 900.0),
    ];
    let store = FinanceStore::from_snapshot(snapshot).unwrap();
    assert_eq!(store.monthly_budgets().len().unwrap(), 1);
    let budget = BudgetService::monthly_budget(&store, march).unwrap().unwrap();
    assert_eq!(budget.amount, 900.0);
}

fn drain<T: Record>(subscription: &Subscription<T>) -> Vec<Vec<T>> {
    std::iter::from_fn(|| subscription.try_next()).collect()
}
