#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the covid dashboard.
//!
//! Serves the dropdown and dashboard REST API for the chart frontend.
//! The IBGE reference table is loaded once at startup and shared
//! read-only for the process lifetime; case records are fetched fresh
//! from brasil.io on every dashboard request and all derived data is
//! recomputed from scratch — nothing outlives a single request.

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use covid_dashboard_geography::GeoTable;
use covid_dashboard_source::CaseSource;
use covid_dashboard_source::brasil_io::BrasilIoClient;

/// Shared application state.
pub struct AppState {
    /// IBGE reference table, immutable after startup.
    pub geo: GeoTable,
    /// Case data source queried on every dashboard request.
    pub source: Arc<dyn CaseSource>,
}

/// Path of the city reference CSV, from `COVID_GEO_CSV` or the default
/// location maintained by the `update-geo` CLI tool.
#[must_use]
pub fn geo_csv_path() -> PathBuf {
    std::env::var("COVID_GEO_CSV")
        .unwrap_or_else(|_| "data/cities_ibge_code.csv".to_string())
        .into()
}

/// Starts the dashboard API server.
///
/// Loads the reference table, builds the brasil.io client from the
/// environment, and starts the Actix-Web HTTP server. This is a regular
/// async function — the caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the reference table cannot be loaded.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let csv_path = geo_csv_path();
    log::info!("Loading reference table from {}...", csv_path.display());
    let geo = GeoTable::from_csv_path(&csv_path).expect("Failed to load IBGE reference table");

    let state = web::Data::new(AppState {
        geo,
        source: Arc::new(BrasilIoClient::from_env()),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/states", web::get().to(handlers::states))
                    .route("/cities", web::get().to(handlers::cities))
                    .route("/dashboard", web::get().to(handlers::dashboard)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
