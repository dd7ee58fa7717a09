//! Pure reductions turning a movement snapshot into chart and report series.
//!
//! Nothing here keeps state between calls; every view is recomputed from the
//! snapshot it is given. Malformed amounts are not rejected: `NaN` simply
//! propagates through the sums.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Write,
};

use chrono::{Datelike, NaiveDate, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::domain::{Amounted, Dated, Movement, MovementKind};

/// Label format used when none is configured. Sorting never depends on it.
pub const DEFAULT_LABEL_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TypeTotals {
    pub income: f64,
    pub expense: f64,
}

impl TypeTotals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// Income and expense summed over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

/// One kind of movement summed over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAmount {
    pub date: NaiveDate,
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// A labelled value for pie and bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
}

/// Stateless aggregation functions over movement snapshots.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Sums amounts per movement kind. An empty snapshot yields zeroes.
    pub fn totals_by_type(movements: &[Movement]) -> TypeTotals {
        movements
            .iter()
            .fold(TypeTotals::default(), |mut totals, movement| {
                match movement.kind() {
                    MovementKind::Income => totals.income += movement.amount(),
                    MovementKind::Expense => totals.expense += movement.amount(),
                }
                totals
            })
    }

    /// Income/expense pie rows.
    pub fn type_split(totals: &TypeTotals) -> Vec<ChartSlice> {
        vec![
            ChartSlice {
                label: MovementKind::Income.to_string(),
                value: totals.income,
            },
            ChartSlice {
                label: MovementKind::Expense.to_string(),
                value: totals.expense,
            },
        ]
    }

    /// Groups movements by the calendar day they fall on in `tz`, ordered
    /// chronologically. Undated movements are skipped.
    pub fn bucket_by_date<Tz: TimeZone>(
        movements: &[Movement],
        tz: &Tz,
        label_format: &str,
    ) -> Vec<DateBucket> {
        let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        let mut undated = 0usize;
        for movement in movements {
            let Some(day) = local_day(movement, tz) else {
                undated += 1;
                continue;
            };
            let entry = buckets.entry(day).or_insert((0.0, 0.0));
            match movement.kind() {
                MovementKind::Income => entry.0 += movement.amount(),
                MovementKind::Expense => entry.1 += movement.amount(),
            }
        }
        if undated > 0 {
            debug!(undated, "skipped undated movements while bucketing by date");
        }
        buckets
            .into_iter()
            .map(|(date, (income, expense))| DateBucket {
                date,
                label: day_label(date, label_format),
                income,
                expense,
            })
            .collect()
    }

    /// Daily sums for a single kind of movement.
    pub fn bucket_kind_by_date<Tz: TimeZone>(
        movements: &[Movement],
        kind: MovementKind,
        tz: &Tz,
        label_format: &str,
    ) -> Vec<DailyAmount> {
        let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for movement in movements.iter().filter(|movement| movement.kind() == kind) {
            if let Some(day) = local_day(movement, tz) {
                *buckets.entry(day).or_insert(0.0) += movement.amount();
            }
        }
        buckets
            .into_iter()
            .map(|(date, amount)| DailyAmount {
                date,
                label: day_label(date, label_format),
                amount,
            })
            .collect()
    }

    /// Sums expenses per known category, in the order the categories are
    /// given. Categories totalling exactly zero are left out.
    pub fn bucket_by_category<S: AsRef<str>>(
        movements: &[Movement],
        categories: &[S],
    ) -> Vec<CategoryTotal> {
        categories
            .iter()
            .map(|category| {
                let category = category.as_ref();
                let total = movements
                    .iter()
                    .filter(|movement| movement.category() == Some(category))
                    .fold(0.0, |acc, movement| acc + movement.amount());
                CategoryTotal {
                    category: category.to_string(),
                    total,
                }
            })
            .filter(|entry| entry.total != 0.0)
            .collect()
    }

    /// Sums every expense under its own category, known or not, in order of
    /// first appearance.
    pub fn group_expenses_by_category(movements: &[Movement]) -> Vec<CategoryTotal> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for movement in movements {
            let Some(category) = movement.category() else {
                continue;
            };
            match positions.get(category) {
                Some(&index) => totals[index].total += movement.amount(),
                None => {
                    positions.insert(category, totals.len());
                    totals.push(CategoryTotal {
                        category: category.to_string(),
                        total: movement.amount(),
                    });
                }
            }
        }
        totals
    }

    /// Keeps the movements dated within `year`/`month` (1-based) in `tz`.
    /// Undated movements are dropped silently.
    pub fn filter_by_month<Tz: TimeZone>(
        movements: &[Movement],
        year: i32,
        month: u32,
        tz: &Tz,
    ) -> Vec<Movement> {
        movements
            .iter()
            .filter(|movement| {
                local_day(movement, tz)
                    .map(|day| day.year() == year && day.month() == month)
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// Largest expenses first, keeping the original order between equal
    /// amounts, truncated to `n`. `NaN` amounts rank below every number.
    pub fn top_n(movements: &[Movement], n: usize) -> Vec<Movement> {
        let mut expenses: Vec<Movement> = movements
            .iter()
            .filter(|movement| movement.is_expense())
            .cloned()
            .collect();
        expenses.sort_by(|a, b| rank(b.amount()).total_cmp(&rank(a.amount())));
        expenses.truncate(n);
        expenses
    }
}

/// Formats a bucket label. A pattern chrono cannot render falls back to
/// [`DEFAULT_LABEL_FORMAT`].
fn day_label(date: NaiveDate, label_format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", date.format(label_format)).is_ok() {
        return label;
    }
    debug!(label_format, "unrenderable label format, using default");
    date.format(DEFAULT_LABEL_FORMAT).to_string()
}

fn local_day<Tz: TimeZone>(movement: &Movement, tz: &Tz) -> Option<NaiveDate> {
    movement
        .date()
        .map(|instant| instant.with_timezone(tz).date_naive())
}

fn rank(amount: f64) -> f64 {
    if amount.is_nan() {
        f64::NEG_INFINITY
    } else {
        amount
    }
}
