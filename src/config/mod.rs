use chrono::{
    format::{Item, StrftimeItems},
    FixedOffset,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::aggregation::DEFAULT_LABEL_FORMAT,
    domain::default_categories,
    errors::{FinanceError, Result},
    utils::{
        fs::{ensure_dir, write_atomic},
        paths,
    },
};

const DEFAULT_TOP_EXPENSES: usize = 5;

/// User preferences. Missing fields fall back to their defaults when loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub notifications: bool,
    /// strftime pattern for date labels in charts
    pub date_format: String,
    pub utc_offset_minutes: i32,
    pub top_expenses: usize,
    pub expense_categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency_symbol: "$".into(),
            theme: None,
            notifications: true,
            date_format: DEFAULT_LABEL_FORMAT.into(),
            utc_offset_minutes: 0,
            top_expenses: DEFAULT_TOP_EXPENSES,
            expense_categories: default_categories(),
        }
    }
}

impl Config {
    /// The strftime pattern for date labels, rejected when chrono cannot
    /// render it.
    pub fn label_format(&self) -> Result<&str> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(FinanceError::Config(format!(
                "date format `{}` is not a valid strftime pattern",
                self.date_format
            )));
        }
        Ok(&self.date_format)
    }

    /// The fixed offset calendar days and months are computed in.
    pub fn time_zone(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                FinanceError::Config(format!(
                    "utc offset of {} minutes is out of range",
                    self.utc_offset_minutes
                ))
            })
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data)?;
            debug!(path = %self.path.display(), "loaded configuration");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
