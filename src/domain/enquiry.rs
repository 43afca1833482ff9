use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{City, CustomerName, EnquiryId, PhoneNumber, Requirement};

/// A customer contact-form submission that has been accepted and stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Enquiry {
    pub id: EnquiryId,
    pub name: CustomerName,
    pub phone: PhoneNumber,
    pub city: City,
    pub requirement: Requirement,
    /// UTC time the store recorded the enquiry.
    pub created_at: NaiveDateTime,
}

/// Validated submission waiting to be persisted.
///
/// Carries no identifier or timestamp; both are assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewEnquiry {
    pub name: CustomerName,
    pub phone: PhoneNumber,
    pub city: City,
    pub requirement: Requirement,
}

impl NewEnquiry {
    #[must_use]
    pub fn new(name: CustomerName, phone: PhoneNumber, city: City, requirement: Requirement) -> Self {
        Self {
            name,
            phone,
            city,
            requirement,
        }
    }
}

impl Enquiry {
    #[must_use]
    pub fn new(id: EnquiryId, enquiry: NewEnquiry, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            name: enquiry.name,
            phone: enquiry.phone,
            city: enquiry.city,
            requirement: enquiry.requirement,
            created_at,
        }
    }

    /// Builds an enquiry from raw column values, validating each of them.
    pub fn try_new(
        id: i32,
        name: String,
        phone: String,
        city: String,
        requirement: String,
        created_at: NaiveDateTime,
    ) -> Result<Self, crate::domain::types::TypeConstraintError> {
        Ok(Self {
            id: EnquiryId::new(id)?,
            name: CustomerName::new(name)?,
            phone: PhoneNumber::new(phone)?,
            city: City::new(city)?,
            requirement: Requirement::new(requirement)?,
            created_at,
        })
    }
}
