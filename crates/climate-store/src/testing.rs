//! Throwaway datasets for tests

use std::path::Path;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};

use crate::{Measurement, Station};

const CREATE_STATION: &str = "CREATE TABLE station (\
    id INTEGER PRIMARY KEY, \
    station TEXT NOT NULL, \
    name TEXT NOT NULL, \
    latitude FLOAT, \
    longitude FLOAT, \
    elevation FLOAT)";

const CREATE_MEASUREMENT: &str = "CREATE TABLE measurement (\
    id INTEGER PRIMARY KEY, \
    station TEXT NOT NULL, \
    date TEXT NOT NULL, \
    prcp FLOAT, \
    tobs FLOAT NOT NULL)";

/// Create `hawaii.sqlite` under `dir` with no tables, returning its URL
pub async fn create_empty_database(dir: &Path) -> Result<String, sqlx::Error> {
    let path = dir.join("hawaii.sqlite");
    let conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .connect()
        .await?;
    conn.close().await?;
    Ok(format!("sqlite://{}", path.display()))
}

/// Create `hawaii.sqlite` under `dir` holding the given rows, returning its URL
pub async fn seed_dataset(
    dir: &Path,
    stations: &[Station],
    measurements: &[Measurement],
) -> Result<String, sqlx::Error> {
    let path = dir.join("hawaii.sqlite");
    let mut conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .connect()
        .await?;

    sqlx::query(CREATE_STATION).execute(&mut conn).await?;
    sqlx::query(CREATE_MEASUREMENT).execute(&mut conn).await?;

    for s in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&s.station)
        .bind(&s.name)
        .bind(s.latitude)
        .bind(s.longitude)
        .bind(s.elevation)
        .execute(&mut conn)
        .await?;
    }

    for m in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(&m.station)
            .bind(&m.date)
            .bind(m.prcp)
            .bind(m.tobs)
            .execute(&mut conn)
            .await?;
    }

    conn.close().await?;
    Ok(format!("sqlite://{}", path.display()))
}

pub fn station(code: &str, name: &str) -> Station {
    Station {
        station: code.to_string(),
        name: name.to_string(),
        latitude: 21.27,
        longitude: -157.82,
        elevation: 3.0,
    }
}

pub fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Measurement {
    Measurement {
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    }
}
