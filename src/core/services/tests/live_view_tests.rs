use chrono::{TimeZone, Utc};

use crate::core::budget_evaluator::UsageStatus;
use crate::core::services::{BudgetService, MovementService, ReportContext, SummaryService};
use crate::core::{watch_movements, BudgetWatch};
use crate::domain::{MonthKey, MovementDraft, MovementKind};
use crate::store::{AllRecords, FinanceStore};

fn expense(amount: f64, category: &str) -> MovementDraft {
    MovementDraft {
        description: "Spend".into(),
        kind: MovementKind::Expense,
        amount,
        category: Some(category.into()),
    }
}

fn income(amount: f64) -> MovementDraft {
    MovementDraft {
        description: "Pay".into(),
        kind: MovementKind::Income,
        amount,
        category: None,
    }
}

#[test]
fn live_view_recomputes_after_writes() {
    let store = FinanceStore::new();
    let ctx = ReportContext::default();
    let mut view = watch_movements(&store, AllRecords, move |movements| {
        SummaryService::dashboard(movements, &ctx).totals
    })
    .unwrap();

    let initial = view.refresh().cloned().unwrap();
    assert_eq!(initial.income, 0.0);

    MovementService::record(&store, income(500.0)).unwrap();
    MovementService::record(&store, expense(120.0, "Food")).unwrap();

    let totals = view.refresh().cloned().unwrap();
    assert_eq!(totals.income, 500.0);
    assert_eq!(totals.expense, 120.0);
    // nothing new pending: the cached value stays
    assert_eq!(view.refresh().map(|t| t.balance()), Some(380.0));
}

#[test]
fn dropping_a_view_releases_its_listener() {
    let store = FinanceStore::new();
    let view = watch_movements(&store, AllRecords, |movements| movements.len()).unwrap();
    assert_eq!(store.movements().subscriber_count().unwrap(), 1);
    drop(view);
    assert_eq!(store.movements().subscriber_count().unwrap(), 0);
    MovementService::record(&store, income(1.0)).unwrap();
}

#[test]
fn live_view_iterates_blocking_updates() {
    let store = FinanceStore::new();
    let mut view = watch_movements(&store, AllRecords, |movements| movements.len()).unwrap();
    assert_eq!(view.next(), Some(0));
    MovementService::record(&store, income(10.0)).unwrap();
    assert_eq!(view.next(), Some(1));
    assert_eq!(view.current(), Some(&1));
}

#[test]
fn budget_watch_combines_all_collections() {
    let store = FinanceStore::new();
    let month = MonthKey::of(&Utc::now(), &Utc);
    let mut watch = BudgetWatch::new(&store, month, ReportContext::default()).unwrap();

    let first = watch.refresh().unwrap();
    assert!(first.monthly.is_none());
    assert!(watch.refresh().is_none());

    BudgetService::set_monthly_budget(&store, month, 1000.0).unwrap();
    BudgetService::add_category_budget(&store, month, "Food", 100.0).unwrap();
    MovementService::record(&store, income(1200.0)).unwrap();
    MovementService::record(&store, expense(500.0, "Food")).unwrap();

    let overview = watch.refresh().unwrap();
    let monthly = overview.monthly.unwrap();
    assert_eq!(monthly.percent_used, 30.0);
    assert_eq!(monthly.status, UsageStatus::Ok);
    assert_eq!(overview.categories[0].usage.percent_used, 100.0);
    assert_eq!(overview.categories[0].usage.status, UsageStatus::Exceeded);
    assert_eq!(watch.month(), month);
}

#[test]
fn budget_watch_ignores_other_months() {
    let store = FinanceStore::new();
    let month = MonthKey::new(2020, 1).unwrap();
    let mut watch = BudgetWatch::new(&store, month, ReportContext::default()).unwrap();
    watch.refresh();

    let at = Utc.with_ymd_and_hms(2020, 2, 3, 0, 0, 0).unwrap();
    MovementService::record_at(&store, expense(50.0, "Food"), at).unwrap();
    BudgetService::set_monthly_budget(&store, MonthKey::new(2020, 2).unwrap(), 10.0).unwrap();

    let overview = watch.refresh().unwrap();
    assert_eq!(overview.totals.expense, 0.0);
    assert!(overview.monthly.is_none());
}
