//! Connection factory and request-level queries

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::ConnectOptions;
use tracing::{debug, info};

use crate::models::{DatedValue, ObservationWindow, TemperatureSummary};
use crate::{Session, StoreError};

/// Date format used by the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the `/tobs` window, counted back from the most recent date
pub const TOBS_WINDOW_DAYS: i64 = 365;

/// Process-wide handle on the dataset.
///
/// Holds connect options only. Every call opens its own [`Session`] and
/// closes it before returning, so no connection outlives a request.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    url: String,
    options: SqliteConnectOptions,
}

impl ClimateStore {
    /// Open the dataset read-only and check its schema.
    ///
    /// Fails if the file cannot be opened or either table is missing.
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|source| StoreError::Connection {
                url: url.to_string(),
                source,
            })?
            .read_only(true);

        let store = Self {
            url: url.to_string(),
            options,
        };

        let mut session = store.session().await?;
        let verified = session.verify_schema().await;
        session.close().await;
        verified?;

        info!("Opened climate dataset at {}", url);
        Ok(store)
    }

    /// Open a fresh connection
    pub async fn session(&self) -> Result<Session, StoreError> {
        let conn = self
            .options
            .connect()
            .await
            .map_err(|source| StoreError::Connection {
                url: self.url.clone(),
                source,
            })?;
        Ok(Session::new(conn))
    }

    /// Every `(date, prcp)` pair, in table order
    pub async fn precipitation(&self) -> Result<Vec<DatedValue<Option<f64>>>, StoreError> {
        let mut session = self.session().await?;
        let result = session.precipitation().await;
        session.close().await;
        result
    }

    /// Every `(station code, name)` pair, in table order
    pub async fn stations(&self) -> Result<Vec<(String, String)>, StoreError> {
        let mut session = self.session().await?;
        let result = session.stations().await;
        session.close().await;
        result
    }

    /// Observations of the most active station from 365 days before the
    /// most recent date up to that date.
    pub async fn last_year_observations(&self) -> Result<ObservationWindow, StoreError> {
        let mut session = self.session().await?;
        let result = observation_window(&mut session).await;
        session.close().await;
        result
    }

    /// Min, max and rounded average temperature from `start` through
    /// `end` (or the latest date when `end` is `None`).
    ///
    /// Fails with [`StoreError::NullAggregate`] when no rows match.
    pub async fn temperature_summary(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureSummary, StoreError> {
        let mut session = self.session().await?;
        let result = session.temperature_summary(start, end).await;
        session.close().await;
        result
    }
}

async fn observation_window(session: &mut Session) -> Result<ObservationWindow, StoreError> {
    let latest = session.latest_date().await?;
    let end = NaiveDate::parse_from_str(&latest, DATE_FORMAT)
        .map_err(|_| StoreError::InvalidDate(latest.clone()))?;
    let start = end - Duration::days(TOBS_WINDOW_DAYS);

    let station = session.most_active_station().await?;
    debug!(
        "Most active station is {} with {} observations",
        station.station, station.observations
    );

    let since = start.format(DATE_FORMAT).to_string();
    let observations = session.observations_since(&station.station, &since).await?;

    Ok(ObservationWindow {
        station,
        start,
        end,
        observations,
    })
}
