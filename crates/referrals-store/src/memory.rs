use crate::error::Result;
use crate::ReferralStore;
use referrals_core::domain::ReferralRecord;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ReferralRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ReferralRecord>) -> Self {
        Self { records }
    }
}

impl ReferralStore for MemoryStore {
    fn ensure_initialized(&mut self) -> Result<()> {
        Ok(())
    }

    fn records(&self) -> Result<Vec<ReferralRecord>> {
        Ok(self.records.clone())
    }

    fn append(&mut self, record: &ReferralRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
