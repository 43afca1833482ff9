//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

fn default_store_timeout_secs() -> u64 {
    5
}

fn default_utc_offset_minutes() -> i32 {
    330
}

fn default_timezone_label() -> String {
    "IST".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_transport_timeout_secs() -> u64 {
    15
}

fn default_brevo_base_url() -> String {
    "https://api.brevo.com".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Upper bound for acquiring a connection and waiting on SQLite locks.
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,
    /// Directory holding the public website; not served when unset.
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Origins allowed to call the API from a browser. `*` allows any.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Bearer token guarding `GET /enquiries`; the listing is open when unset.
    #[serde(default)]
    pub admin_token: Option<String>,
    pub notification: NotificationConfig,
}

impl ServerConfig {
    /// Never shorter than one second; the pool rejects a zero timeout.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs.max(1))
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Owner notification settings.
pub struct NotificationConfig {
    pub sender_name: String,
    pub sender_email: String,
    /// Falls back to `sender_email` when unset.
    #[serde(default)]
    pub owner_email: Option<String>,
    pub business_name: String,
    #[serde(default)]
    pub business_footer: String,
    /// Offset of the owner's local time from UTC, used in the email body.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_timezone_label")]
    pub timezone_label: String,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl NotificationConfig {
    pub fn recipient(&self) -> &str {
        self.owner_email.as_deref().unwrap_or(&self.sender_email)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
/// Email transport selected for owner notifications.
pub enum TransportConfig {
    /// Only write notifications to the log.
    #[default]
    Log,
    Smtp(SmtpConfig),
    Brevo(BrevoConfig),
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    #[default]
    Starttls,
    Tls,
    None,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub tls: SmtpTls,
    #[serde(default = "default_transport_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BrevoConfig {
    pub api_key: String,
    #[serde(default = "default_brevo_base_url")]
    pub base_url: String,
    #[serde(default = "default_transport_timeout_secs")]
    pub timeout_secs: u64,
}
