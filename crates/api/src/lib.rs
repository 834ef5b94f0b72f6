//! # Clinic Booking API
//!
//! The web server for the clinic booking service: public endpoints for
//! browsing specialties and doctors, checking availability and booking, plus
//! admin endpoints for the catalogue and appointment management.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract and validate requests, call into `clinic_core`
//! - **Middleware**: Error to HTTP mapping
//! - **Config**: Environment configuration
//!
//! Handlers only see storage through `clinic_core::store::ClinicStore`, so the
//! same router runs over Postgres in production and over the in-memory store
//! in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use clinic_core::store::ClinicStore;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::config::ApiConfig;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use clinic_api::ApiState;
/// use clinic_db::memory::MemoryStore;
///
/// let state = Arc::new(ApiState::new(Arc::new(MemoryStore::seeded())));
/// ```
pub struct ApiState {
    pub store: Arc<dyn ClinicStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }
}

/// Builds the full router: all routes, the JSON 404 fallback and the
/// tracing, timeout and optional CORS layers.
pub fn app(state: Arc<ApiState>, config: &ApiConfig) -> Result<Router> {
    let app = Router::new()
        .merge(routes::health::routes())
        .merge(routes::specialty::routes())
        .merge(routes::doctor::routes())
        .merge(routes::appointment::routes())
        .merge(routes::admin::routes())
        .fallback(middleware::error_handling::route_not_found)
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    Ok(app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    ))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .wrap_err_with(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins))
}

/// Installs logging, builds the router and serves it until the process exits.
pub async fn start_server(config: ApiConfig, store: Arc<dyn ClinicStore>) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(store));
    let app = app(state, &config)?;

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
