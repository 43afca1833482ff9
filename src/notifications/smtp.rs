//! SMTP relay transport backed by lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::models::config::{SmtpConfig, SmtpTls};
use crate::notifications::{
    Delivery, EmailAddress, EmailTransport, NotificationError, OutboundEmail,
};

pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        let builder = match config.tls {
            SmtpTls::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| NotificationError::Configuration(e.to_string()))?,
            SmtpTls::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| NotificationError::Configuration(e.to_string()))?,
            SmtpTls::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            }
        };

        let mailer = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { mailer })
    }
}

fn mailbox(address: &EmailAddress) -> Result<Mailbox, NotificationError> {
    let email = address
        .email
        .parse::<Address>()
        .map_err(|e| NotificationError::InvalidAddress(format!("{}: {e}", address.email)))?;
    Ok(Mailbox::new(address.name.clone(), email))
}

/// Builds the MIME message for an outbound email.
pub fn build_message(email: &OutboundEmail) -> Result<Message, NotificationError> {
    Message::builder()
        .from(mailbox(&email.sender)?)
        .to(mailbox(&email.recipient)?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| NotificationError::Build(e.to_string()))
}

#[async_trait]
impl EmailTransport for SmtpTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<Delivery, NotificationError> {
        let message = build_message(email)?;

        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        Ok(Delivery {
            receipt: Some(format!("smtp {}", response.code())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(recipient: &str) -> OutboundEmail {
        OutboundEmail {
            sender: EmailAddress::named("Pipe Traders Website", "website@example.com"),
            recipient: EmailAddress::new(recipient),
            subject: "🔧 New Enquiry: Ravi (Sitapur) — Pipe Traders Website".to_string(),
            html: "<p>Ravi</p>".to_string(),
        }
    }

    #[test]
    fn message_carries_html_body() {
        let message = build_message(&email("owner@example.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Content-Type: text/html"));
        assert!(raw.contains("To: owner@example.com"));
    }

    #[test]
    fn malformed_recipient_is_reported() {
        assert!(matches!(
            build_message(&email("not an address")),
            Err(NotificationError::InvalidAddress(_))
        ));
    }

    #[test]
    fn transport_builds_from_config() {
        let config = SmtpConfig {
            host: "smtp-relay.brevo.com".to_string(),
            port: 587,
            username: "user".to_string(),
            password: "secret".to_string(),
            tls: SmtpTls::Starttls,
            timeout_secs: 10,
        };
        assert!(SmtpTransport::new(&config).is_ok());
    }
}
