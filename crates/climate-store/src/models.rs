//! Row types for the climate dataset

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One climate reading (`measurement` table)
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Station code, references [`Station::station`]
    pub station: String,
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation amount, absent for some readings
    pub prcp: Option<f64>,
    /// Temperature observation
    pub tobs: f64,
}

impl Measurement {
    pub(crate) const COLUMNS: &'static str = "station, date, prcp, tobs";
}

/// Observation point metadata (`station` table)
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station code
    pub station: String,
    /// Human-readable name
    pub name: String,
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
    /// Height above sea level
    pub elevation: f64,
}

impl Station {
    pub(crate) const COLUMNS: &'static str = "station, name, latitude, longitude, elevation";
}

/// Station with the highest number of measurement rows
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MostActiveStation {
    pub station: String,
    pub name: String,
    pub observations: i64,
}

/// A value keyed by its date.
///
/// Serializes as a single-entry object: `{"2017-01-01": 0.08}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedValue<T> {
    pub date: String,
    pub value: T,
}

impl<T> From<(String, T)> for DatedValue<T> {
    fn from((date, value): (String, T)) -> Self {
        Self { date, value }
    }
}

impl<T: Serialize> Serialize for DatedValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.value)?;
        map.end()
    }
}

/// Trailing year of temperature observations for the most active station
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationWindow {
    pub station: MostActiveStation,
    /// Inclusive lower bound
    pub start: NaiveDate,
    /// Most recent date in the dataset
    pub end: NaiveDate,
    pub observations: Vec<DatedValue<f64>>,
}

/// Min, max and average temperature over a date range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSummary {
    pub min: f64,
    pub max: f64,
    /// Rounded to two decimals
    pub avg: f64,
}

/// Round to two decimal places, ties to even.
///
/// Ties are decided on the exact binary value, so `72.125` gives `72.12`
/// while `2.675` (stored just below) gives `2.67`.
pub fn round_to_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Exact remainder of the multiplication
    let error = value.mul_add(100.0, -scaled);
    let floor = scaled.floor();

    let past_half = (scaled - floor - 0.5) + error;
    let hundredths = if past_half > 0.0 {
        floor + 1.0
    } else if past_half < 0.0 {
        floor
    } else if floor.rem_euclid(2.0) == 0.0 {
        floor
    } else {
        floor + 1.0
    };
    hundredths / 100.0
}
