use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::Value;

use enquiry_intake::repository::EnquiryStore;
use enquiry_intake::services::enquiry::ListingAccess;
use enquiry_intake::{cors_policy, routes, static_site};

mod common;

use common::{MemoryStore, RecordingTransport};

macro_rules! cors_app {
    ($origins:expr) => {{
        let store: Arc<dyn EnquiryStore> = Arc::new(MemoryStore::default());
        let origins: Vec<String> = $origins;
        test::init_service(
            App::new()
                .wrap(cors_policy(&origins))
                .app_data(web::Data::from(store))
                .app_data(web::Data::new(common::dispatcher(Arc::new(
                    RecordingTransport::default(),
                ))))
                .app_data(web::Data::new(ListingAccess::default()))
                .configure(routes::configure),
        )
        .await
    }};
}

fn preflight(origin: &str, method: &str) -> test::TestRequest {
    test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/enquiry")
        .insert_header((header::ORIGIN, origin))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, method))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
}

#[actix_web::test]
async fn test_cors_allows_listed_origin() {
    let app = cors_app!(vec!["https://a.example".to_string()]);

    let resp = test::call_service(&app, preflight("https://a.example", "POST").to_request()).await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://a.example"
    );
    let methods = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(!methods.contains("DELETE"));
}

#[actix_web::test]
async fn test_cors_ignores_unlisted_origin() {
    let app = cors_app!(vec!["https://a.example".to_string()]);

    let resp = test::call_service(&app, preflight("https://b.example", "POST").to_request()).await;
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/enquiries")
            .insert_header((header::ORIGIN, "https://b.example"))
            .to_request(),
    )
    .await;
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[actix_web::test]
async fn test_cors_wildcard_allows_any_origin() {
    let app = cors_app!(vec!["*".to_string()]);

    let resp = test::call_service(&app, preflight("https://b.example", "POST").to_request()).await;

    assert!(resp.status().is_success());
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_some()
    );
}

#[actix_web::test]
async fn test_static_site_falls_back_to_index() {
    let dir = tempfile::tempdir().expect("create tempdir");
    std::fs::write(dir.path().join("index.html"), "<h1>Pipe Traders</h1>").unwrap();
    std::fs::write(dir.path().join("about.html"), "<h1>About</h1>").unwrap();

    let store: Arc<dyn EnquiryStore> = Arc::new(MemoryStore::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .app_data(web::Data::new(common::dispatcher(Arc::new(
                RecordingTransport::default(),
            ))))
            .app_data(web::Data::new(ListingAccess::default()))
            .configure(routes::configure)
            .service(static_site(dir.path())),
    )
    .await;

    for (uri, expected) in [
        ("/", "<h1>Pipe Traders</h1>"),
        ("/about.html", "<h1>About</h1>"),
        ("/products/gi-pipes", "<h1>Pipe Traders</h1>"),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "uri {uri}");
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], expected.as_bytes(), "uri {uri}");
    }

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/enquiries").to_request(),
    )
    .await;
    assert_eq!(body["success"], true);
}
