#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, TimeZone, Utc};
use finance_core::{
    config::{Config, ConfigManager},
    domain::{CategoryBudget, Investment, InvestmentKind, MonthKey, MonthlyBudget, Movement},
    store::StoreSnapshot,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory kept alive until the test binary exits.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn march_2024() -> MonthKey {
    MonthKey::new(2024, 3).unwrap()
}

/// A March 2024 household: salary, rent, groceries and one leisure overrun.
pub fn sample_snapshot() -> StoreSnapshot {
    let march = march_2024();
    StoreSnapshot {
        movements: vec![
            Movement::income("Salary", 1200.0, at(2024, 3, 1)),
            Movement::expense("Rent", 300.0, "Home", at(2024, 3, 2)),
            Movement::expense("Groceries", 180.0, "Food", at(2024, 3, 6)),
            Movement::expense("Concert", 20.0, "Leisure", at(2024, 3, 20)),
            Movement::expense("Old bill", 99.0, "Home", at(2024, 2, 27)),
        ],
        monthly_budgets: vec![MonthlyBudget::new(march, 1000.0)],
        category_budgets: vec![
            CategoryBudget::new(march, "Food", 200.0),
            CategoryBudget::new(march, "Leisure", 10.0),
        ],
        investments: vec![Investment::new(
            "Index fund",
            2500.0,
            InvestmentKind::Funds,
            at(2024, 1, 15),
        )],
    }
}

pub fn write_snapshot(dir: &Path, snapshot: &StoreSnapshot) -> PathBuf {
    let path = dir.join("snapshot.json");
    let json = serde_json::to_string_pretty(snapshot).expect("serialize snapshot");
    std::fs::write(&path, json).expect("write snapshot");
    path
}

pub fn write_config(dir: &Path, config: &Config) {
    ConfigManager::with_base_dir(dir.to_path_buf())
        .expect("config manager for temp dir")
        .save(config)
        .expect("save config");
}
