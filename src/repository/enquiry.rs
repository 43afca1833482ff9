//! Repository implementation for enquiries.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::enquiry::{Enquiry, NewEnquiry},
    models::enquiry::{Enquiry as DbEnquiry, NewEnquiry as DbNewEnquiry},
    repository::{
        DieselRepository, EnquiryListQuery, EnquiryReader, EnquiryWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl EnquiryWriter for DieselRepository {
    fn create_enquiry(&self, new_enquiry: &NewEnquiry) -> RepositoryResult<Enquiry> {
        use crate::schema::enquiries;

        let mut conn = self.conn()?;

        let db_new_enquiry = DbNewEnquiry::stamped(new_enquiry, Utc::now().naive_utc());

        let db_enquiry = diesel::insert_into(enquiries::table)
            .values(&db_new_enquiry)
            .returning(DbEnquiry::as_returning())
            .get_result::<DbEnquiry>(&mut conn)?;

        let enquiry = Enquiry::try_from(db_enquiry).map_err(RepositoryError::from)?;
        Ok(enquiry)
    }
}

impl EnquiryReader for DieselRepository {
    fn list_recent_enquiries(&self, query: EnquiryListQuery) -> RepositoryResult<Vec<Enquiry>> {
        use crate::schema::enquiries;

        let mut conn = self.conn()?;

        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);

        let db_enquiries = enquiries::table
            .order((enquiries::created_at.desc(), enquiries::id.desc()))
            .limit(limit)
            .select(DbEnquiry::as_select())
            .load::<DbEnquiry>(&mut conn)?;

        db_enquiries
            .into_iter()
            .map(|row| Enquiry::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}
