//! Anti-fraud rules applied to a referral before it is stored.
//!
//! The checks are meant to run in declaration order: self-referral, rate
//! limit, suspicious pattern, duplicate referee. Callers stop at the first
//! rejection so the reported reason is deterministic.

use crate::error::CoreError;
use thiserror::Error;

pub const DEFAULT_MAX_REFERRALS_PER_REFERRER: usize = 10;
pub const DEFAULT_SUSPICIOUS_PATTERNS: [&str; 5] =
    ["test@", "fake@", "temp@", "mailinator", "example.com"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FraudRejection {
    #[error("Fraude: el referido no puede ser el mismo referidor.")]
    SelfReferral,
    #[error("Fraude: el referidor ha excedido el límite de {limit} referencias.")]
    RateLimitExceeded { limit: usize },
    #[error("Fraude: el email del referido parece inválido o sospechoso.")]
    SuspiciousPattern,
    #[error("Fraude: el referido ya está registrado.")]
    DuplicateReferee,
}

impl FraudRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            FraudRejection::SelfReferral => "self_referral",
            FraudRejection::RateLimitExceeded { .. } => "rate_limit_exceeded",
            FraudRejection::SuspiciousPattern => "suspicious_pattern",
            FraudRejection::DuplicateReferee => "duplicate_referee",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudPolicy {
    max_referrals_per_referrer: usize,
    suspicious_patterns: Vec<String>,
}

impl Default for FraudPolicy {
    fn default() -> Self {
        Self {
            max_referrals_per_referrer: DEFAULT_MAX_REFERRALS_PER_REFERRER,
            suspicious_patterns: DEFAULT_SUSPICIOUS_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
        }
    }
}

impl FraudPolicy {
    /// Patterns are lowercased so they match normalized addresses.
    pub fn new<I, S>(max_referrals_per_referrer: usize, patterns: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if max_referrals_per_referrer == 0 {
            return Err(CoreError::InvalidMaxReferrals(max_referrals_per_referrer));
        }
        let mut suspicious_patterns = Vec::new();
        for pattern in patterns {
            let raw = pattern.as_ref();
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(CoreError::InvalidPattern(raw.to_string()));
            }
            suspicious_patterns.push(trimmed.to_lowercase());
        }
        Ok(Self {
            max_referrals_per_referrer,
            suspicious_patterns,
        })
    }

    pub fn max_referrals_per_referrer(&self) -> usize {
        self.max_referrals_per_referrer
    }

    pub fn suspicious_patterns(&self) -> &[String] {
        &self.suspicious_patterns
    }

    pub fn is_suspicious(&self, normalized_referee: &str) -> bool {
        self.suspicious_patterns
            .iter()
            .any(|pattern| normalized_referee.contains(pattern.as_str()))
    }

    pub fn check_self_referral(
        &self,
        normalized_referrer: &str,
        normalized_referee: &str,
    ) -> Result<(), FraudRejection> {
        if normalized_referrer == normalized_referee {
            return Err(FraudRejection::SelfReferral);
        }
        Ok(())
    }

    pub fn check_rate_limit(&self, existing_referrals: usize) -> Result<(), FraudRejection> {
        if existing_referrals >= self.max_referrals_per_referrer {
            return Err(FraudRejection::RateLimitExceeded {
                limit: self.max_referrals_per_referrer,
            });
        }
        Ok(())
    }

    pub fn check_pattern(&self, normalized_referee: &str) -> Result<(), FraudRejection> {
        if self.is_suspicious(normalized_referee) {
            return Err(FraudRejection::SuspiciousPattern);
        }
        Ok(())
    }

    pub fn check_duplicate(&self, referee_exists: bool) -> Result<(), FraudRejection> {
        if referee_exists {
            return Err(FraudRejection::DuplicateReferee);
        }
        Ok(())
    }
}
