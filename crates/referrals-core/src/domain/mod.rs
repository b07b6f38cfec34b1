pub mod email;
pub mod referral;

pub use email::{is_valid_email, normalize_email, EmailAddress};
pub use referral::{ReferralRecord, REFEREE_COLUMN, REFERRER_COLUMN};
