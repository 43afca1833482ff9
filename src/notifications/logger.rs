use async_trait::async_trait;

use crate::notifications::{Delivery, EmailTransport, NotificationError, OutboundEmail};

/// Writes notifications to the log instead of sending them.
///
/// Used for local development when no mail credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

#[async_trait]
impl EmailTransport for LogTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<Delivery, NotificationError> {
        log::info!(
            "Email to {} from {}: {}",
            email.recipient.email,
            email.sender.email,
            email.subject
        );
        log::debug!("{}", email.html);
        Ok(Delivery::default())
    }
}
