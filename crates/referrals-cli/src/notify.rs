use anyhow::Result;
use tracing::info;

pub trait Notifier: Send + Sync {
    fn send(&self, recipient: &str, body: &str) -> Result<()>;
}

/// Writes notices to the log instead of sending mail.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, recipient: &str, body: &str) -> Result<()> {
        info!(recipient, "{body}");
        Ok(())
    }
}

pub fn welcome_body(referee: &str) -> String {
    format!("Enviando email de bienvenida a {referee}...")
}

pub fn thanks_body(referrer: &str) -> String {
    format!("Notificando agradecimiento a {referrer}...")
}

#[cfg(test)]
mod tests {
    use super::{thanks_body, welcome_body};

    #[test]
    fn notice_bodies_name_the_recipient() {
        assert_eq!(
            welcome_body("grace@x.com"),
            "Enviando email de bienvenida a grace@x.com..."
        );
        assert_eq!(
            thanks_body("ada@x.com"),
            "Notificando agradecimiento a ada@x.com..."
        );
    }
}
