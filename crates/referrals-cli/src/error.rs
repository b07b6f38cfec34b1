use anyhow::Error;
use referrals_config::ConfigError;
use referrals_core::rules::FraudRejection;
use referrals_core::CoreError;
use referrals_store::error::{StoreError, StoreErrorKind};
use referrals_store::RegisterError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(CliError::InvalidInput(_)) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(register_err) = cause.downcast_ref::<RegisterError>() {
            return ExitCode::from(register_exit_code(register_err));
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if cause.downcast_ref::<FraudRejection>().is_some()
            || cause.downcast_ref::<CoreError>().is_some()
        {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn register_exit_code(err: &RegisterError) -> u8 {
    match err {
        RegisterError::Rejected(_) => EXIT_INVALID_INPUT,
        RegisterError::Store(store_err) => store_exit_code(store_err),
        RegisterError::Poisoned => EXIT_FAILURE,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::InvalidDataPath => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingColumn | StoreErrorKind::Csv | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidDbPath(_)
        | ConfigError::InvalidBind(_)
        | ConfigError::InvalidFraud(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
