//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::enquiry::{Enquiry, NewEnquiry};
use crate::repository::errors::RepositoryResult;
use crate::repository::{EnquiryListQuery, EnquiryReader, EnquiryWriter};

mock! {
    pub Repository {}

    impl EnquiryReader for Repository {
        fn list_recent_enquiries(&self, query: EnquiryListQuery) -> RepositoryResult<Vec<Enquiry>>;
    }

    impl EnquiryWriter for Repository {
        fn create_enquiry(&self, new_enquiry: &NewEnquiry) -> RepositoryResult<Enquiry>;
    }
}
