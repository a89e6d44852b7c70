//! Temperature Summary Routes

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use climate_store::{TemperatureSummary, DATE_FORMAT};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::debug;

use crate::{ApiError, AppState};

/// Summary rendered as `[{"Min Temp": x}, {"Max Temp": y}, {"Avg Temp": z}]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReport(pub TemperatureSummary);

impl Serialize for TemperatureReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = [
            ("Min Temp", self.0.min),
            ("Max Temp", self.0.max),
            ("Avg Temp", self.0.avg),
        ];
        let mut seq = serializer.serialize_seq(Some(entries.len()))?;
        for (label, value) in entries {
            seq.serialize_element(&LabelledValue(label, value))?;
        }
        seq.end()
    }
}

/// Single-entry object `{label: value}`
struct LabelledValue(&'static str, f64);

impl Serialize for LabelledValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, &self.1)?;
        map.end()
    }
}

/// Temperatures from `start` through the most recent date
pub async fn get_from_start(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureReport>, ApiError> {
    check_date(&state, &start)?;
    debug!("Summarising temperatures from {}", start);

    let summary = state.store.temperature_summary(&start, None).await?;
    Ok(Json(TemperatureReport(summary)))
}

/// Temperatures from `start` through `end`, both inclusive
pub async fn get_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureReport>, ApiError> {
    check_date(&state, &start)?;
    check_date(&state, &end)?;
    debug!("Summarising temperatures from {} to {}", start, end);

    let summary = state.store.temperature_summary(&start, Some(&end)).await?;
    Ok(Json(TemperatureReport(summary)))
}

/// Without validation, a malformed date simply matches no rows
fn check_date(state: &AppState, date: &str) -> Result<(), ApiError> {
    if state.api.validate_dates && NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
        return Err(ApiError::InvalidDate(date.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_shape() {
        let report = TemperatureReport(TemperatureSummary {
            min: 60.0,
            max: 62.0,
            avg: 61.0,
        });

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"[{"Min Temp":60.0},{"Max Temp":62.0},{"Avg Temp":61.0}]"#
        );
    }
}
