//! Brevo transactional email API transport.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::config::BrevoConfig;
use crate::notifications::{
    Delivery, EmailAddress, EmailTransport, NotificationError, OutboundEmail,
};

const SEND_PATH: &str = "/v3/smtp/email";

#[derive(Debug, Serialize)]
struct Contact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

impl<'a> From<&'a EmailAddress> for Contact<'a> {
    fn from(address: &'a EmailAddress) -> Self {
        Self {
            name: address.name.as_deref(),
            email: &address.email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    message_id: Option<String>,
}

pub struct BrevoTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl BrevoTransport {
    pub fn new(config: &BrevoConfig) -> Result<Self, NotificationError> {
        if config.api_key.trim().is_empty() {
            return Err(NotificationError::Configuration(
                "brevo api_key is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotificationError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}{SEND_PATH}", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl EmailTransport for BrevoTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<Delivery, NotificationError> {
        let body = SendRequest {
            sender: Contact::from(&email.sender),
            to: vec![Contact::from(&email.recipient)],
            subject: &email.subject,
            html_content: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // An unreadable success body still means Brevo accepted the message.
        let receipt = response
            .json::<SendResponse>()
            .await
            .ok()
            .and_then(|r| r.message_id);

        Ok(Delivery { receipt })
    }
}
