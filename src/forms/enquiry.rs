use serde::Deserialize;
use validator::Validate;

use crate::domain::enquiry::NewEnquiry;
use crate::domain::types::{
    City, CustomerName, NonEmptyString, PhoneNumber, Requirement, TypeConstraintError,
};
use crate::forms::ValidationError;

/// Order in which required fields are reported as missing.
const REQUIRED_FIELDS: [&str; 4] = ["name", "phone", "city", "requirement"];

#[derive(Debug, Default, Clone, Deserialize, Validate)]
/// Contact form submitted by a website visitor.
pub struct EnquiryForm {
    #[validate(required)]
    pub name: Option<String>,
    #[validate(required)]
    pub phone: Option<String>,
    #[validate(required)]
    pub city: Option<String>,
    #[validate(required)]
    pub requirement: Option<String>,
}

impl EnquiryForm {
    pub fn new(name: &str, phone: &str, city: &str, requirement: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            city: Some(city.to_string()),
            requirement: Some(requirement.to_string()),
        }
    }
}

fn present(field: &'static str, value: Option<String>) -> Result<NonEmptyString, ValidationError> {
    NonEmptyString::new(value.unwrap_or_default()).map_err(|_| ValidationError::MissingField(field))
}

fn rejected(field: &'static str) -> impl Fn(TypeConstraintError) -> ValidationError {
    move |err| match err {
        TypeConstraintError::InvalidPhone => ValidationError::InvalidPhone,
        _ => ValidationError::MissingField(field),
    }
}

impl TryFrom<EnquiryForm> for NewEnquiry {
    type Error = ValidationError;

    /// Checks presence of every field first, then the phone format.
    fn try_from(form: EnquiryForm) -> Result<Self, Self::Error> {
        if let Err(errors) = form.validate() {
            let field_errors = errors.field_errors();
            let missing = REQUIRED_FIELDS
                .into_iter()
                .find(|field| field_errors.contains_key(*field))
                .unwrap_or(REQUIRED_FIELDS[0]);
            return Err(ValidationError::MissingField(missing));
        }

        let name = present("name", form.name)?;
        let phone = present("phone", form.phone)?;
        let city = present("city", form.city)?;
        let requirement = present("requirement", form.requirement)?;

        Ok(NewEnquiry::new(
            CustomerName::new(name.into_inner()).map_err(rejected("name"))?,
            PhoneNumber::new(phone.into_inner()).map_err(rejected("phone"))?,
            City::new(city.into_inner()).map_err(rejected("city"))?,
            Requirement::new(requirement.into_inner()).map_err(rejected("requirement"))?,
        ))
    }
}
