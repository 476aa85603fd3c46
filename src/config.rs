// Config module for shared configuration utilities

use crate::constants;
use std::path::PathBuf;

pub fn config_dir() -> String {
    std::env::var("QA_DIR").unwrap_or_else(|_| ".".to_string())
}

/// Path of the release table, honouring an explicit `--table` override.
pub fn table_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    let dir = config_dir();
    if dir == "." {
        PathBuf::from(constants::TABLE_FILE)
    } else {
        PathBuf::from(dir).join(constants::TABLE_FILE)
    }
}
