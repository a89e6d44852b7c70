//! Per-request database session

use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::{debug, warn};

use crate::models::{DatedValue, Measurement, MostActiveStation, Station, TemperatureSummary};
use crate::{round_to_hundredths, StoreError};

/// One open connection to the dataset.
///
/// Call [`Session::close`] when done. A session that is dropped instead
/// (early return, `?`) still releases its connection.
pub struct Session {
    conn: SqliteConnection,
}

impl Session {
    pub(crate) fn new(conn: SqliteConnection) -> Self {
        Self { conn }
    }

    /// Release the connection
    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!("Failed to close database session: {}", e);
        }
    }

    /// Fail unless both tables expose the declared columns
    pub(crate) async fn verify_schema(&mut self) -> Result<(), StoreError> {
        for (table, columns) in [
            ("measurement", Measurement::COLUMNS),
            ("station", Station::COLUMNS),
        ] {
            let sql = format!("SELECT {columns} FROM {table} LIMIT 0");
            sqlx::query(&sql)
                .fetch_all(&mut self.conn)
                .await
                .map_err(|source| StoreError::MissingTable { table, source })?;
        }
        Ok(())
    }

    /// All `(date, prcp)` pairs in table order
    pub async fn precipitation(&mut self) -> Result<Vec<DatedValue<Option<f64>>>, StoreError> {
        let rows: Vec<(String, Option<f64>)> =
            sqlx::query_as("SELECT date, CAST(prcp AS REAL) FROM measurement")
                .fetch_all(&mut self.conn)
                .await?;

        debug!("Fetched {} precipitation rows", rows.len());
        Ok(rows.into_iter().map(DatedValue::from).collect())
    }

    /// All `(station code, name)` pairs in table order
    pub async fn stations(&mut self) -> Result<Vec<(String, String)>, StoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT station, name FROM station")
            .fetch_all(&mut self.conn)
            .await?;

        debug!("Fetched {} stations", rows.len());
        Ok(rows)
    }

    /// Most recent measurement date, as stored
    pub async fn latest_date(&mut self) -> Result<String, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT date FROM measurement ORDER BY date DESC LIMIT 1")
                .fetch_optional(&mut self.conn)
                .await?;

        row.map(|(date,)| date).ok_or(StoreError::EmptyDataset)
    }

    /// Station with the most measurement rows.
    ///
    /// Ties are not broken explicitly: whichever tied station the database
    /// returns first after the descending sort is chosen.
    pub async fn most_active_station(&mut self) -> Result<MostActiveStation, StoreError> {
        let row: Option<MostActiveStation> = sqlx::query_as(
            "SELECT station.station AS station, station.name AS name, \
                    COUNT(measurement.station) AS observations \
             FROM station \
             JOIN measurement ON measurement.station = station.station \
             GROUP BY station.station \
             ORDER BY COUNT(measurement.station) DESC \
             LIMIT 1",
        )
        .fetch_optional(&mut self.conn)
        .await?;

        row.ok_or(StoreError::EmptyDataset)
    }

    /// `(date, tobs)` for one station on or after `since`
    pub async fn observations_since(
        &mut self,
        station: &str,
        since: &str,
    ) -> Result<Vec<DatedValue<f64>>, StoreError> {
        let rows: Vec<(String, f64)> = sqlx::query_as(
            "SELECT date, CAST(tobs AS REAL) FROM measurement \
             WHERE date >= ?1 AND station = ?2",
        )
        .bind(since)
        .bind(station)
        .fetch_all(&mut self.conn)
        .await?;

        debug!("Fetched {} observations for {} since {}", rows.len(), station, since);
        Ok(rows.into_iter().map(DatedValue::from).collect())
    }

    /// Min, max and average temperature for `date >= start`, bounded by
    /// `date <= end` when given.
    ///
    /// Dates are compared as text. A range with no rows (including
    /// `start > end` and malformed dates) yields [`StoreError::NullAggregate`].
    pub async fn temperature_summary(
        &mut self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureSummary, StoreError> {
        let (min, max, avg): (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT CAST(MIN(tobs) AS REAL), CAST(MAX(tobs) AS REAL), CAST(AVG(tobs) AS REAL) \
             FROM measurement \
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut self.conn)
        .await?;

        Ok(TemperatureSummary {
            min: min.ok_or(StoreError::NullAggregate("minimum temperature"))?,
            max: max.ok_or(StoreError::NullAggregate("maximum temperature"))?,
            avg: round_to_hundredths(avg.ok_or(StoreError::NullAggregate("average temperature"))?),
        })
    }
}
