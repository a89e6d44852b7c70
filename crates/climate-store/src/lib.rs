//! Climate Store
//!
//! Read-only SQLite access to the `measurement` and `station` tables.
//! A [`ClimateStore`] is created once at startup and hands out one
//! [`Session`] (one connection) per request.

mod models;
mod session;
mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use models::{
    round_to_hundredths, DatedValue, Measurement, MostActiveStation, ObservationWindow, Station,
    TemperatureSummary,
};
pub use session::Session;
pub use store::{ClimateStore, DATE_FORMAT, TOBS_WINDOW_DAYS};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Table `{table}` is missing or lacks the expected columns: {source}")]
    MissingTable {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("The measurement table is empty")]
    EmptyDataset,
    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("No measurements matched; {0} is null")]
    NullAggregate(&'static str),
}
