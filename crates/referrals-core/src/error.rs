use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("invalid max referrals per referrer: {0}")]
    InvalidMaxReferrals(usize),
    #[error("invalid suspicious pattern: {0:?}")]
    InvalidPattern(String),
}
