//! Best-effort owner notifications for accepted enquiries.
//!
//! [`NotificationDispatcher`] renders an enquiry into an email and hands it to
//! an [`EmailTransport`]. Delivery is attempted once; failures are logged and
//! never reach the submitter or the store.

use std::sync::Arc;

use actix_web::rt::task::JoinHandle;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::enquiry::Enquiry;
use crate::models::config::{NotificationConfig, TransportConfig};

pub mod brevo;
pub mod logger;
pub mod render;
pub mod smtp;

pub use brevo::BrevoTransport;
pub use logger::LogTransport;
pub use render::EmailRenderer;
pub use smtp::SmtpTransport;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid notification configuration: {0}")]
    Configuration(String),

    #[error("failed to render email: {0}")]
    Render(String),

    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("delivery rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Sender or recipient of an outbound email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress {
    pub name: Option<String>,
    pub email: String,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    pub fn named(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }
}

/// Fully rendered email ready to hand to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundEmail {
    pub sender: EmailAddress,
    pub recipient: EmailAddress,
    pub subject: String,
    pub html: String,
}

/// Receipt returned by a transport after the message was accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Transport-specific reference such as a provider message id.
    pub receipt: Option<String>,
}

#[derive(Debug)]
pub enum NotificationOutcome {
    Delivered(Delivery),
    Failed(NotificationError),
}

impl NotificationOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationOutcome::Delivered(_))
    }
}

/// A channel that can deliver one email.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<Delivery, NotificationError>;
}

/// Builds the transport selected in configuration.
pub fn build_transport(
    config: &TransportConfig,
) -> Result<Arc<dyn EmailTransport>, NotificationError> {
    let transport: Arc<dyn EmailTransport> = match config {
        TransportConfig::Log => Arc::new(LogTransport),
        TransportConfig::Smtp(smtp) => Arc::new(SmtpTransport::new(smtp)?),
        TransportConfig::Brevo(brevo) => Arc::new(BrevoTransport::new(brevo)?),
    };
    Ok(transport)
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    transport: Arc<dyn EmailTransport>,
    renderer: EmailRenderer,
    sender: EmailAddress,
    recipient: EmailAddress,
}

impl NotificationDispatcher {
    pub fn new(
        transport: Arc<dyn EmailTransport>,
        config: &NotificationConfig,
    ) -> Result<Self, NotificationError> {
        Ok(Self {
            transport,
            renderer: EmailRenderer::new(config)?,
            sender: EmailAddress::named(&config.sender_name, &config.sender_email),
            recipient: EmailAddress::new(config.recipient()),
        })
    }

    /// Renders the owner email for an enquiry.
    pub fn compose(&self, enquiry: &Enquiry) -> Result<OutboundEmail, NotificationError> {
        Ok(OutboundEmail {
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            subject: self.renderer.subject(enquiry),
            html: self.renderer.html(enquiry)?,
        })
    }

    /// Makes a single delivery attempt and logs its outcome.
    pub async fn notify(&self, enquiry: &Enquiry) -> NotificationOutcome {
        let result = match self.compose(enquiry) {
            Ok(email) => self.transport.send(&email).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(delivery) => {
                log::info!(
                    "Notification sent for enquiry #{}: {}",
                    enquiry.id,
                    delivery.receipt.as_deref().unwrap_or("no receipt")
                );
                NotificationOutcome::Delivered(delivery)
            }
            Err(err) => {
                log::error!(
                    "Notification failed for enquiry #{} (enquiry still saved): {err}",
                    enquiry.id
                );
                NotificationOutcome::Failed(err)
            }
        }
    }

    /// Spawns [`Self::notify`] on the current actix runtime.
    ///
    /// Callers drop the handle; it is returned only so tests can observe the
    /// outcome.
    pub fn dispatch(&self, enquiry: Enquiry) -> JoinHandle<NotificationOutcome> {
        let dispatcher = self.clone();
        actix_web::rt::spawn(async move { dispatcher.notify(&enquiry).await })
    }
}
