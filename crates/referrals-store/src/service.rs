//! Check-and-append orchestration over a [`ReferralStore`].
//!
//! A service owns its store behind a mutex and holds the lock for the whole
//! sequence of fraud checks plus the append. Two concurrent registrations on
//! the same service therefore cannot both pass the duplicate-referee or
//! rate-limit checks.

use crate::error::StoreError;
use crate::ReferralStore;
use referrals_core::domain::{normalize_email, ReferralRecord};
use referrals_core::rules::{FraudPolicy, FraudRejection};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("{0}")]
    Rejected(#[from] FraudRejection),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("referral store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, RegisterError>;

/// An accepted referral with the normalized forms used by the checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub record: ReferralRecord,
    pub normalized_referrer: String,
    pub normalized_referee: String,
}

pub struct ReferralService<S> {
    store: Mutex<S>,
    policy: FraudPolicy,
}

impl<S: ReferralStore> ReferralService<S> {
    pub fn new(store: S, policy: FraudPolicy) -> Self {
        Self {
            store: Mutex::new(store),
            policy,
        }
    }

    pub fn policy(&self) -> &FraudPolicy {
        &self.policy
    }

    pub fn initialize(&self) -> Result<()> {
        self.lock()?.ensure_initialized()?;
        Ok(())
    }

    /// Runs the fraud checks and, when they all pass, stores the addresses
    /// exactly as submitted.
    pub fn register(&self, referrer: &str, referee: &str) -> Result<Registration> {
        let mut store = self.lock()?;
        let registration = self.evaluate_locked(&*store, referrer, referee)?;
        store.append(&registration.record)?;
        info!(
            referrer = %registration.normalized_referrer,
            referee = %registration.normalized_referee,
            "referral registered"
        );
        Ok(registration)
    }

    /// Runs the same checks as [`register`](Self::register) without storing
    /// anything.
    pub fn evaluate(&self, referrer: &str, referee: &str) -> Result<Registration> {
        let store = self.lock()?;
        self.evaluate_locked(&*store, referrer, referee)
    }

    pub fn records(&self) -> Result<Vec<ReferralRecord>> {
        Ok(self.lock()?.records()?)
    }

    pub fn into_inner(self) -> Result<S> {
        self.store.into_inner().map_err(|_| RegisterError::Poisoned)
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>> {
        self.store.lock().map_err(|_| RegisterError::Poisoned)
    }

    fn evaluate_locked(&self, store: &S, referrer: &str, referee: &str) -> Result<Registration> {
        let normalized_referrer = normalize_email(referrer);
        let normalized_referee = normalize_email(referee);

        self.policy
            .check_self_referral(&normalized_referrer, &normalized_referee)?;

        let existing = store.count_by_referrer(&normalized_referrer)?;
        debug!(referrer = %normalized_referrer, existing, "referrer history scanned");
        self.policy.check_rate_limit(existing)?;

        self.policy.check_pattern(&normalized_referee)?;

        let duplicate = store.referee_exists(&normalized_referee)?;
        self.policy.check_duplicate(duplicate)?;

        Ok(Registration {
            record: ReferralRecord::new(referrer, referee),
            normalized_referrer,
            normalized_referee,
        })
    }
}

impl RegisterError {
    pub fn rejection(&self) -> Option<&FraudRejection> {
        match self {
            RegisterError::Rejected(rejection) => Some(rejection),
            RegisterError::Store(_) | RegisterError::Poisoned => None,
        }
    }
}
