use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use crate::dto::enquiry::{EnquiryListResponse, MessageResponse};
use crate::forms::enquiry::EnquiryForm;
use crate::notifications::NotificationDispatcher;
use crate::repository::EnquiryStore;
use crate::services::enquiry::{self as enquiry_service, ListingAccess};
use crate::services::ServiceError;

const ACCEPTED_MESSAGE: &str =
    "Aapki enquiry submit ho gayi! Hum 24 ghante mein sampark karenge.";
const SERVER_ERROR_MESSAGE: &str = "Server error. Kripya dobara try karein ya call karein.";
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized.";

#[post("/enquiry")]
pub async fn submit_enquiry(
    store: web::Data<dyn EnquiryStore>,
    dispatcher: web::Data<NotificationDispatcher>,
    web::Json(form): web::Json<EnquiryForm>,
) -> impl Responder {
    match enquiry_service::submit_enquiry(store.get_ref(), dispatcher.get_ref(), form) {
        Ok(_) => HttpResponse::Created().json(MessageResponse::success(ACCEPTED_MESSAGE)),
        Err(ServiceError::Validation(err)) => HttpResponse::BadRequest()
            .json(MessageResponse::rejected(err.user_message(), err.code())),
        Err(err) => {
            log::error!("Failed to accept enquiry: {err}");
            HttpResponse::InternalServerError().json(MessageResponse::failure(SERVER_ERROR_MESSAGE))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

#[get("/enquiries")]
pub async fn list_enquiries(
    req: HttpRequest,
    store: web::Data<dyn EnquiryStore>,
    access: web::Data<ListingAccess>,
) -> impl Responder {
    match enquiry_service::list_enquiries(store.get_ref(), access.get_ref(), bearer_token(&req)) {
        Ok(enquiries) => HttpResponse::Ok().json(EnquiryListResponse::from(enquiries)),
        Err(ServiceError::Unauthorized) => {
            HttpResponse::Unauthorized().json(MessageResponse::failure(UNAUTHORIZED_MESSAGE))
        }
        Err(err) => {
            log::error!("Failed to list enquiries: {err}");
            HttpResponse::InternalServerError().json(MessageResponse::failure(SERVER_ERROR_MESSAGE))
        }
    }
}
