//! Climate Observations API Server
//!
//! Read-only JSON API over the precipitation and temperature records of a
//! climate dataset.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::GovernorLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
pub mod rate_limit;
pub mod routes;
pub mod settings;

pub use error::{ApiError, ErrorResponse};
pub use settings::Settings;

use anyhow::Context;
use climate_store::ClimateStore;
use settings::ApiSettings;

/// Application state shared across handlers.
///
/// Immutable once built; handlers only read it.
pub struct AppState {
    /// Connection factory for the dataset
    pub store: ClimateStore,
    /// Request handling options
    pub api: ApiSettings,
}

impl AppState {
    pub fn new(store: ClimateStore, api: ApiSettings) -> Self {
        Self { store, api }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, settings: &Settings) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::index::welcome))
        .route(
            "/api/v1.0/precipitation",
            get(routes::observations::get_precipitation),
        )
        .route("/api/v1.0/stations", get(routes::observations::get_stations))
        .route("/api/v1.0/tobs", get(routes::observations::get_tobs))
        .route("/api/v1.0/:start", get(routes::temperature::get_from_start))
        .route("/api/v1.0/:start/:end", get(routes::temperature::get_between))
        .with_state(state);

    if let Some(secs) = settings.server.request_timeout_secs {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(secs)));
    }

    if settings.rate_limit.enabled {
        match rate_limit::create_governor_config(&settings.rate_limit) {
            Some(config) => router = router.layer(GovernorLayer { config }),
            None => warn!("Rate limiting disabled: per_second and burst_size must be non-zero"),
        }
    }

    router.layer(TraceLayer::new_for_http())
}

/// Initialize logging
pub fn init_logging(
    debug: bool,
    json: bool,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

/// Open the dataset and serve until the process is stopped
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let store = ClimateStore::open(&settings.database.url)
        .await
        .with_context(|| format!("Climate dataset unavailable at {}", settings.database.url))?;

    let state = Arc::new(AppState::new(store, settings.api.clone()));
    let app = create_router(state, &settings);

    let addr = settings.server.socket_addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
