pub mod csv_store;
pub mod error;
pub mod memory;
pub mod paths;
pub mod service;

use crate::error::Result;
use referrals_core::domain::{normalize_email, ReferralRecord};

pub use csv_store::CsvStore;
pub use memory::MemoryStore;
pub use service::{ReferralService, RegisterError, Registration};

/// Append-only set of accepted referrals.
///
/// Scans compare normalized forms of the stored addresses; records keep the
/// text that was submitted.
pub trait ReferralStore {
    /// Creates the backing record set if it is missing. Safe to call again.
    fn ensure_initialized(&mut self) -> Result<()>;

    /// All records in insertion order.
    fn records(&self) -> Result<Vec<ReferralRecord>>;

    fn append(&mut self, record: &ReferralRecord) -> Result<()>;

    fn count_by_referrer(&self, normalized_referrer: &str) -> Result<usize> {
        Ok(self
            .records()?
            .iter()
            .filter(|record| normalize_email(&record.referrer_email) == normalized_referrer)
            .count())
    }

    fn referee_exists(&self, normalized_referee: &str) -> Result<bool> {
        Ok(self
            .records()?
            .iter()
            .any(|record| normalize_email(&record.referee_email) == normalized_referee))
    }
}
