//! Precipitation, Station and TOBS Routes

use axum::{extract::State, Json};
use climate_store::DatedValue;
use std::sync::Arc;
use tracing::info;

use crate::{ApiError, AppState};

/// Every `{date: prcp}` pair in the dataset
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DatedValue<Option<f64>>>>, ApiError> {
    let data = state.store.precipitation().await?;
    Ok(Json(data))
}

/// Every station as a `[code, name]` pair
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<(String, String)>>, ApiError> {
    let data = state.store.stations().await?;
    Ok(Json(data))
}

/// `{date: tobs}` for the most active station over the last year of data
pub async fn get_tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DatedValue<f64>>>, ApiError> {
    let window = state.store.last_year_observations().await?;
    info!(
        "Serving {} observations for {} ({}) from {} to {}",
        window.observations.len(),
        window.station.station,
        window.station.name,
        window.start,
        window.end
    );
    Ok(Json(window.observations))
}
