use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use referrals_core::rules::FraudPolicy;
use referrals_core::CoreError;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "referrals";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: Option<PathBuf>,
    pub bind: SocketAddr,
    pub fraud: FraudPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            bind: default_bind(),
            fraud: FraudPolicy::default(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid db_path value: {0}")]
    InvalidDbPath(PathBuf),
    #[error("invalid bind address: {0}")]
    InvalidBind(String),
    #[error("invalid fraud settings: {0}")]
    InvalidFraud(#[from] CoreError),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    db_path: Option<PathBuf>,
    bind: Option<String>,
    fraud: Option<FraudFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FraudFile {
    max_referrals_per_referrer: Option<usize>,
    suspicious_patterns: Option<Vec<String>>,
}

/// Loads the config file. An explicit path must exist; the default location
/// is optional and falls back to built-in defaults.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(db_path) = parsed.db_path {
        if db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidDbPath(db_path));
        }
        config.db_path = Some(db_path);
    }

    if let Some(bind) = parsed.bind {
        config.bind = bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;
    }

    if let Some(fraud) = parsed.fraud {
        let max = fraud
            .max_referrals_per_referrer
            .unwrap_or_else(|| config.fraud.max_referrals_per_referrer());
        config.fraud = match fraud.suspicious_patterns {
            Some(patterns) => FraudPolicy::new(max, patterns)?,
            None => FraudPolicy::new(max, config.fraud.suspicious_patterns())?,
        };
    }

    Ok(config)
}
