pub mod fraud;

pub use fraud::{
    FraudPolicy, FraudRejection, DEFAULT_MAX_REFERRALS_PER_REFERRER, DEFAULT_SUSPICIOUS_PATTERNS,
};
