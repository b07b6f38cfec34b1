use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DOTLESS_DOMAINS: [&str; 2] = ["gmail.com", "googlemail.com"];

/// Canonical comparison form of an address: lowercased and trimmed, `+tag`
/// removed from the local part, and dots removed for Gmail domains.
///
/// Input without an `@` comes back lowercased and trimmed. Dot removal can
/// expose leading whitespace (`". x@gmail.com"`), so the result is trimmed
/// again to keep the function idempotent.
pub fn normalize_email(value: &str) -> String {
    let email = value.to_lowercase();
    let email = email.trim();

    let Some((local, domain)) = email.split_once('@') else {
        return email.to_string();
    };

    let local = match local.split_once('+') {
        Some((base, _)) => base,
        None => local,
    };

    if DOTLESS_DOMAINS.contains(&domain) {
        let local = local.replace('.', "");
        format!("{}@{}", local.trim_start(), domain)
    } else {
        format!("{local}@{domain}")
    }
}

/// Plain `local@domain` shape: quoted local parts, IP-literal domains and
/// domains without a dot are refused even though RFC 5321 allows them.
pub fn is_valid_email(value: &str) -> bool {
    let Ok(address) = lettre::Address::from_str(value) else {
        return false;
    };
    let user = address.user();
    let domain = address.domain();
    !user.starts_with('"') && !domain.starts_with('[') && domain.contains('.')
}

/// A syntactically valid address, kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if !is_valid_email(raw) {
            return Err(CoreError::InvalidEmail(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        normalize_email(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, normalize_email, EmailAddress};

    #[test]
    fn normalize_email_strips_tag_and_lowercases_gmail() {
        assert_eq!(normalize_email("User+test@Gmail.com"), "user@gmail.com");
    }

    #[test]
    fn normalize_email_removes_dots_for_googlemail() {
        assert_eq!(normalize_email("u.ser@googlemail.com"), "user@googlemail.com");
    }

    #[test]
    fn normalize_email_strips_tag_on_other_domains() {
        assert_eq!(normalize_email("a+b@other.com"), "a@other.com");
    }

    #[test]
    fn normalize_email_keeps_dots_outside_gmail() {
        assert_eq!(normalize_email("a.b@outlook.com"), "a.b@outlook.com");
        assert_eq!(normalize_email("a.b@mail.gmail.com"), "a.b@mail.gmail.com");
    }

    #[test]
    fn normalize_email_trims_whitespace() {
        assert_eq!(normalize_email("  A.Da+x@GMAIL.com \n"), "ada@gmail.com");
    }

    #[test]
    fn normalize_email_without_at_is_lowercased_only() {
        assert_eq!(normalize_email("  Not.An+Email "), "not.an+email");
    }

    #[test]
    fn normalize_email_splits_at_first_at_sign() {
        assert_eq!(normalize_email("a+x@b@gmail.com"), "a@b@gmail.com");
    }

    #[test]
    fn normalize_email_is_idempotent() {
        let samples = [
            "User+test@Gmail.com",
            "u.ser@googlemail.com",
            "a+b@other.com",
            "  Mixed.Case+Tag@Example.ORG  ",
            "no-at-sign",
            "+leading@gmail.com",
            "a.b.c+d.e@gmail.com",
            "",
            "@",
            ". x@gmail.com",
            ". +x@googlemail.com",
        ];
        for sample in samples {
            let once = normalize_email(sample);
            assert_eq!(normalize_email(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn normalize_email_trims_whitespace_exposed_by_dot_removal() {
        assert_eq!(normalize_email(". x@gmail.com"), "x@gmail.com");
        assert_eq!(normalize_email(".\t.Ada@Gmail.com"), "ada@gmail.com");
    }

    #[test]
    fn normalize_email_is_idempotent_for_short_inputs() {
        const ALPHABET: [char; 6] = [' ', '.', '+', '@', 'a', 'B'];
        const SUFFIXES: [&str; 5] = ["", "@gmail.com", "@GoogleMail.com", "@x.com", " @"];

        let mut locals = vec![String::new()];
        let mut frontier = locals.clone();
        for _ in 0..4 {
            frontier = frontier
                .iter()
                .flat_map(|prefix| ALPHABET.iter().map(move |ch| format!("{prefix}{ch}")))
                .collect();
            locals.extend(frontier.iter().cloned());
        }

        for local in &locals {
            for suffix in SUFFIXES {
                let input = format!("{local}{suffix}");
                let once = normalize_email(&input);
                assert_eq!(normalize_email(&once), once, "input {input:?}");
            }
        }
    }

    #[test]
    fn is_valid_email_accepts_local_at_domain() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("ada+tag@gmail.com"));
    }

    #[test]
    fn is_valid_email_rejects_malformed() {
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn is_valid_email_rejects_addresses_outside_plain_shape() {
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("\"a b\"@x.com"));
        assert!(!is_valid_email("a@[127.0.0.1]"));
        assert!(is_valid_email("a@mail.x.com"));
    }

    #[test]
    fn email_address_keeps_submitted_text() {
        let address = EmailAddress::parse("Ada.L+x@Gmail.com").expect("parse");
        assert_eq!(address.as_str(), "Ada.L+x@Gmail.com");
        assert_eq!(address.normalized(), "adal@gmail.com");
    }
}
