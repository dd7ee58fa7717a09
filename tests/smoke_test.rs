mod common;

use finance_core::{
    core::services::{ReportContext, SummaryService},
    init,
    store::FinanceStore,
};

#[test]
fn snapshot_to_monthly_report_smoke() {
    init();

    let store = FinanceStore::from_snapshot(common::sample_snapshot()).unwrap();
    let movements = store.movements().snapshot().unwrap();
    let report =
        SummaryService::monthly_report(&movements, common::march_2024(), &ReportContext::default());

    assert_eq!(report.totals.income, 1200.0);
    assert_eq!(report.totals.expense, 500.0);
    assert_eq!(report.top_expenses.len(), 3);
    assert_eq!(store.investments().len().unwrap(), 1);
}
