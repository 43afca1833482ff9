//! HTTP routes of the intake API.

use actix_web::{HttpResponse, error, web};

use crate::dto::enquiry::MessageResponse;

pub mod enquiry;

/// Largest JSON body accepted by the intake routes.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Registers the API routes and their JSON extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| {
            log::warn!("Rejected enquiry body: {err}");
            let response = HttpResponse::BadRequest().json(MessageResponse::rejected(
                "Form data samajh nahi aaya. Please dobara try karo.",
                "invalid_body",
            ));
            error::InternalError::from_response(err, response).into()
        });

    cfg.app_data(json_config)
        .service(enquiry::submit_enquiry)
        .service(enquiry::list_enquiries);
}
