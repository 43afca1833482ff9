//! Domain aggregates exposed by the enquiry service layer.

pub mod enquiry;
pub mod types;
