//! Application services orchestrating validation, persistence and notification.

use thiserror::Error;

use crate::forms::ValidationError;
use crate::repository::errors::RepositoryError;

pub mod enquiry;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid enquiry: {0}")]
    Validation(#[from] ValidationError),

    #[error("enquiry store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),

    #[error("unauthorized")]
    Unauthorized,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
