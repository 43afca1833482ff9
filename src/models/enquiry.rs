//! Diesel models for storing enquiries.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    enquiry::{Enquiry as DomainEnquiry, NewEnquiry as DomainNewEnquiry},
    types::TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::enquiries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::enquiry::Enquiry`].
pub struct Enquiry {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub requirement: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::enquiries)]
/// Insertable form of [`Enquiry`].
pub struct NewEnquiry<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub city: &'a str,
    pub requirement: &'a str,
    pub created_at: NaiveDateTime,
}

impl<'a> NewEnquiry<'a> {
    /// Stamps the validated enquiry with the time the store received it.
    pub fn stamped(enquiry: &'a DomainNewEnquiry, created_at: NaiveDateTime) -> Self {
        Self {
            name: enquiry.name.as_str(),
            phone: enquiry.phone.as_str(),
            city: enquiry.city.as_str(),
            requirement: enquiry.requirement.as_str(),
            created_at,
        }
    }
}

impl TryFrom<Enquiry> for DomainEnquiry {
    type Error = TypeConstraintError;

    fn try_from(enquiry: Enquiry) -> Result<Self, Self::Error> {
        DomainEnquiry::try_new(
            enquiry.id,
            enquiry.name,
            enquiry.phone,
            enquiry.city,
            enquiry.requirement,
            enquiry.created_at,
        )
    }
}
