use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".finance_core";
const CONFIG_FILE: &str = "config.json";
const SNAPSHOT_FILE: &str = "snapshot.json";

/// Returns the application data directory, defaulting to `~/.finance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINANCE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Default location of the exported store snapshot read by the report binary.
pub fn snapshot_file() -> PathBuf {
    app_data_dir().join(SNAPSHOT_FILE)
}
