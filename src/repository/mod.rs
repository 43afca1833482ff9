use crate::db::{DbConnection, DbPool};
use crate::domain::enquiry::{Enquiry, NewEnquiry};
use crate::repository::errors::RepositoryResult;

pub mod enquiry;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Largest page the listing endpoint will ever return.
pub const MAX_LIST_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquiryListQuery {
    pub limit: usize,
}

impl Default for EnquiryListQuery {
    fn default() -> Self {
        Self {
            limit: MAX_LIST_LIMIT,
        }
    }
}

impl EnquiryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of returned enquiries, never above [`MAX_LIST_LIMIT`].
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_LIST_LIMIT);
        self
    }
}

pub trait EnquiryReader {
    /// Returns the most recent enquiries, newest first.
    fn list_recent_enquiries(&self, query: EnquiryListQuery) -> RepositoryResult<Vec<Enquiry>>;
}

pub trait EnquiryWriter {
    /// Persists the enquiry, assigning its id and creation time.
    fn create_enquiry(&self, new_enquiry: &NewEnquiry) -> RepositoryResult<Enquiry>;
}

/// Everything the intake pipeline needs from a store, usable as a trait object.
pub trait EnquiryStore: EnquiryReader + EnquiryWriter + Send + Sync {}

impl<T> EnquiryStore for T where T: EnquiryReader + EnquiryWriter + Send + Sync {}

/// Diesel-backed repository over a pooled SQLite database.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(crate::db::get_connection(&self.pool)?)
    }
}
