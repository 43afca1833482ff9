//! Form definitions backing the intake routes.

use thiserror::Error;

pub mod enquiry;

/// Reasons a submitted enquiry form is rejected before anything is stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("phone number must be exactly 10 digits")]
    InvalidPhone,
}

impl ValidationError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidPhone => "invalid_phone",
        }
    }

    /// Message shown to the person who filled in the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "Sabhi fields zaroori hain. Please sab bharo.",
            ValidationError::InvalidPhone => "Phone number 10 digit ka hona chahiye.",
        }
    }
}
