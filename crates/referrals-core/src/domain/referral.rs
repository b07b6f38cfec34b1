use serde::{Deserialize, Serialize};

pub const REFERRER_COLUMN: &str = "referrer_email";
pub const REFEREE_COLUMN: &str = "referee_email";

/// One accepted referral, holding both addresses as they were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralRecord {
    pub referrer_email: String,
    pub referee_email: String,
}

impl ReferralRecord {
    pub fn new(referrer_email: impl Into<String>, referee_email: impl Into<String>) -> Self {
        Self {
            referrer_email: referrer_email.into(),
            referee_email: referee_email.into(),
        }
    }
}
