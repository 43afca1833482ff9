//! Intake pipeline: validate, persist, notify.

use crate::domain::enquiry::{Enquiry, NewEnquiry};
use crate::forms::enquiry::EnquiryForm;
use crate::notifications::NotificationDispatcher;
use crate::repository::{EnquiryListQuery, EnquiryReader, EnquiryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Access rule for the enquiry listing.
///
/// With no token configured the listing is open.
#[derive(Clone, Debug, Default)]
pub struct ListingAccess {
    token: Option<String>,
}

impl ListingAccess {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn permits(&self, presented: Option<&str>) -> bool {
        match &self.token {
            None => true,
            Some(expected) => presented == Some(expected.as_str()),
        }
    }
}

/// Validates and stores a submission, then notifies the owner in the background.
///
/// The returned enquiry is durable; the notification outcome is only logged.
pub fn submit_enquiry<R>(
    repo: &R,
    dispatcher: &NotificationDispatcher,
    form: EnquiryForm,
) -> ServiceResult<Enquiry>
where
    R: EnquiryWriter + ?Sized,
{
    let new_enquiry = NewEnquiry::try_from(form)?;

    let enquiry = repo.create_enquiry(&new_enquiry)?;

    log::info!(
        "Enquiry #{} saved: {} ({}) {}",
        enquiry.id,
        enquiry.name,
        enquiry.city,
        enquiry.phone
    );

    // Detached; the response never waits for delivery.
    let _ = dispatcher.dispatch(enquiry.clone());

    Ok(enquiry)
}

/// Returns the newest enquiries for the owner's listing.
pub fn list_enquiries<R>(
    repo: &R,
    access: &ListingAccess,
    presented_token: Option<&str>,
) -> ServiceResult<Vec<Enquiry>>
where
    R: EnquiryReader + ?Sized,
{
    if !access.permits(presented_token) {
        return Err(ServiceError::Unauthorized);
    }

    Ok(repo.list_recent_enquiries(EnquiryListQuery::new())?)
}
