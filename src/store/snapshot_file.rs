use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::{FinanceError, Result};

use super::StoreSnapshot;

/// Untyped view of the file so one bad record does not reject the rest.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSnapshot {
    movements: Vec<Value>,
    monthly_budgets: Vec<Value>,
    category_budgets: Vec<Value>,
    investments: Vec<Value>,
}

/// Reads an exported store snapshot from a JSON file. Records that do not
/// match their collection's shape are logged and skipped.
pub fn load_snapshot(path: &Path) -> Result<StoreSnapshot> {
    if !path.exists() {
        return Err(FinanceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("snapshot `{}` not found", path.display()),
        )));
    }
    let data = fs::read_to_string(path)?;
    let raw: RawSnapshot = serde_json::from_str(&data)?;
    let snapshot = StoreSnapshot {
        movements: decode_records("movements", raw.movements),
        monthly_budgets: decode_records("monthly_budgets", raw.monthly_budgets),
        category_budgets: decode_records("category_budgets", raw.category_budgets),
        investments: decode_records("investments", raw.investments),
    };
    info!(
        path = %path.display(),
        movements = snapshot.movements.len(),
        monthly_budgets = snapshot.monthly_budgets.len(),
        category_budgets = snapshot.category_budgets.len(),
        investments = snapshot.investments.len(),
        "loaded store snapshot"
    );
    Ok(snapshot)
}

fn decode_records<T: DeserializeOwned>(collection: &str, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(collection, index, %err, "dropped malformed record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_sections_default_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshot.json");
        fs::write(&path, r#"{ "monthly_budgets": [ { "month": "2024-02", "amount": 900.0 } ] }"#)
            .unwrap();
        let snapshot = load_snapshot(&path).unwrap();
        assert!(snapshot.movements.is_empty());
        assert_eq!(snapshot.monthly_budgets.len(), 1);
        assert_eq!(snapshot.monthly_budgets[0].month.to_string(), "2024-02");
    }

    #[test]
    fn malformed_records_are_skipped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshot.json");
        fs::write(
            &path,
            r#"{
                "movements": [
                    { "type": "Income", "id": "6f1c1c7e-2f0b-4c55-9d55-0a6a3c3b8d10",
                      "description": "Salary", "amount": 10.0 },
                    { "type": "Expense", "description": "no id or category" }
                ],
                "monthly_budgets": [ { "month": "2024-13", "amount": 1.0 } ]
            }"#,
        )
        .unwrap();
        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.movements.len(), 1);
        assert!(snapshot.monthly_budgets.is_empty());
    }

    #[test]
    fn invalid_json_is_a_serde_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshot.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_snapshot(&path), Err(FinanceError::Serde(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let err = load_snapshot(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FinanceError::Io(_)));
    }
}
