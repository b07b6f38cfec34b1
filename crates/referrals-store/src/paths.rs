use crate::error::{Result, StoreError};
use std::env;
use std::path::PathBuf;

pub const DB_FILENAME: &str = "referrals.csv";
pub const DB_PATH_ENV: &str = "REFERRALS_DB_PATH";

/// Explicit path first, then `REFERRALS_DB_PATH`, then `referrals.csv` in the
/// working directory.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path);
    }

    if let Some(value) = env::var_os(DB_PATH_ENV) {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path);
    }

    Ok(PathBuf::from(DB_FILENAME))
}
