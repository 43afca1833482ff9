//! HTTP server bootstrap.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};

use crate::db;
use crate::models::config::ServerConfig;
use crate::notifications::{NotificationDispatcher, build_transport};
use crate::repository::{DieselRepository, EnquiryStore};
use crate::routes;
use crate::services::enquiry::ListingAccess;

/// Builds the CORS policy for the configured origins.
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    allowed_origins.iter().fold(
        Cors::default()
            .allowed_methods(["GET", "POST"])
            .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .max_age(3600),
        |cors, origin| cors.allowed_origin(origin),
    )
}

/// Serves the public website, falling back to `index.html` for unknown paths.
pub fn static_site(dir: &Path) -> Files {
    let index: PathBuf = dir.join("index.html");
    Files::new("/", dir)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let res = file.into_response(&req);
                Ok(ServiceResponse::new(req, res))
            }
        }))
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = db::establish_connection_pool(
        &server_config.database_url,
        server_config.store_timeout(),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to establish database connection: {e}")))?;

    db::run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run database migrations: {e}")))?;

    let store: Arc<dyn EnquiryStore> = Arc::new(DieselRepository::new(pool));
    let store = web::Data::from(store);

    let transport = build_transport(&server_config.notification.transport)
        .map_err(|e| std::io::Error::other(format!("Failed to set up email transport: {e}")))?;
    let dispatcher = NotificationDispatcher::new(transport, &server_config.notification)
        .map_err(|e| std::io::Error::other(format!("Failed to set up notifications: {e}")))?;
    let dispatcher = web::Data::new(dispatcher);

    let access = web::Data::new(ListingAccess::new(server_config.admin_token.clone()));
    if server_config.admin_token.is_none() {
        log::warn!("No admin_token configured; GET /enquiries is open to anyone");
    }

    let static_dir = server_config
        .static_dir
        .as_deref()
        .map(PathBuf::from)
        .filter(|dir| {
            let exists = dir.is_dir();
            if !exists {
                log::warn!("Static directory {} not found; website not served", dir.display());
            }
            exists
        });

    let allowed_origins = server_config.allowed_origins.clone();
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        let app = App::new()
            .wrap(cors_policy(&allowed_origins))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(dispatcher.clone())
            .app_data(access.clone())
            .configure(routes::configure);

        match &static_dir {
            Some(dir) => app.service(static_site(dir)),
            None => app,
        }
    })
    .bind(bind_address)?
    .run()
    .await
}
