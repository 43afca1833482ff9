//! Renders owner notification emails with Tera.
//!
//! The template name ends in `.html`, so Tera escapes every interpolated
//! value; customer input reaches the email body as text, never as markup.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};
use tera::{Context, Tera};

use crate::domain::enquiry::Enquiry;
use crate::models::config::NotificationConfig;
use crate::notifications::NotificationError;

const TEMPLATE_NAME: &str = "email/enquiry.html";
const TEMPLATE: &str = include_str!("../../templates/email/enquiry.html");

/// `Monday, 19 October 2026 at 3:45 pm`
const RECEIVED_AT_FORMAT: &str = "%A, %-d %B %Y at %-I:%M %P";

#[derive(Clone)]
pub struct EmailRenderer {
    tera: Arc<Tera>,
    offset: FixedOffset,
    business_name: String,
    business_footer: String,
    timezone_label: String,
    sender_name: String,
}

impl EmailRenderer {
    pub fn new(config: &NotificationConfig) -> Result<Self, NotificationError> {
        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                NotificationError::Configuration(format!(
                    "utc offset of {} minutes is out of range",
                    config.utc_offset_minutes
                ))
            })?;

        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| NotificationError::Render(e.to_string()))?;

        Ok(Self {
            tera: Arc::new(tera),
            offset,
            business_name: config.business_name.clone(),
            business_footer: config.business_footer.clone(),
            timezone_label: config.timezone_label.clone(),
            sender_name: config.sender_name.clone(),
        })
    }

    /// Formats a stored UTC timestamp in the owner's local time.
    pub fn received_at(&self, created_at: NaiveDateTime) -> String {
        Utc.from_utc_datetime(&created_at)
            .with_timezone(&self.offset)
            .format(RECEIVED_AT_FORMAT)
            .to_string()
    }

    pub fn subject(&self, enquiry: &Enquiry) -> String {
        format!(
            "🔧 New Enquiry: {} ({}) — {}",
            enquiry.name, enquiry.city, self.sender_name
        )
    }

    pub fn html(&self, enquiry: &Enquiry) -> Result<String, NotificationError> {
        let mut context = Context::new();
        context.insert("business_name", &self.business_name);
        context.insert("business_footer", &self.business_footer);
        context.insert("timezone_label", &self.timezone_label);
        context.insert("name", enquiry.name.as_str());
        context.insert("phone", enquiry.phone.as_str());
        context.insert("city", enquiry.city.as_str());
        context.insert("requirement", enquiry.requirement.as_str());
        context.insert("received_at", &self.received_at(enquiry.created_at));

        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| NotificationError::Render(e.to_string()))
    }
}
