//! Outbound mail for contact notifications.
//!
//! Notifications are strictly best-effort: the durable row in the archive is
//! the guarantee, the email is a convenience. Callers spawn
//! [`Mailer::send_contact_notification`] in the background and log failures
//! instead of surfacing them.

use std::time::Duration;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::{config::SmtpConfig, db::ContactMessage};

/// Upper bound on a single SMTP conversation, connect included. A slow relay
/// must not pin background tasks forever.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// SMTP client plus the fixed sender/recipient pair for notifications.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl Mailer {
    /// Build a STARTTLS transport from config. Credentials are optional so a
    /// local relay without auth (e.g. in development) also works.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailerError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .timeout(Some(SEND_TIMEOUT));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from.parse()?,
            to: config.to.parse()?,
        })
    }

    /// Send the "new message" notification for a row that has already been
    /// persisted.
    pub async fn send_contact_notification(
        &self,
        message: &ContactMessage,
    ) -> Result<(), MailerError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(format!("New contact message from {}", message.name))
            .multipart(MultiPart::alternative_plain_html(
                plain_body(message),
                html_body(message),
            ))?;

        self.transport.send(email).await?;
        Ok(())
    }
}

// ── message bodies ───────────────────────────────────────────────────────────

fn plain_body(message: &ContactMessage) -> String {
    format!(
        "You received a new message.\n\nName: {}\nEmail: {}\n\nMessage:\n{}\n",
        message.name, message.email, message.message
    )
}

/// HTML variant. Submitted values are attacker-controlled and must be escaped
/// before interpolation.
fn html_body(message: &ContactMessage) -> String {
    format!(
        "<h3>New contact message</h3>\
         <p><b>Name:</b> {}</p>\
         <p><b>Email:</b> {}</p>\
         <p><b>Message:</b></p>\
         <p>{}</p>",
        escape_html(&message.name),
        escape_html(&message.email),
        escape_html(&message.message),
    )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;

    fn sample() -> ContactMessage {
        ContactMessage {
            id: 1,
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            message: "Hello there".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn plain_body_contains_all_fields() {
        let body = plain_body(&sample());
        assert!(body.contains("Ada"));
        assert!(body.contains("ada@example.com"));
        assert!(body.contains("Hello there"));
    }

    #[test]
    fn html_body_escapes_markup() {
        let mut message = sample();
        message.message = "<script>alert(1)</script>".to_owned();
        let body = html_body(&message);
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>"));
    }

    #[test]
    fn escape_html_is_ampersand_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
