use serde::{Deserialize, Serialize};

/// A single GPS fix. `timestamp_ms` is milliseconds since the unix epoch;
/// within a trip timestamps are non-decreasing by convention but we don't
/// enforce that on ingestion.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GpsPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "ts")]
    pub timestamp_ms: i64,
}

/// An ordered sequence of fixes recorded by one vehicle. Trip ids are unique,
/// one vehicle may own many trips. A trip with fewer than 2 points can be
/// stored but cannot produce a speed.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Trip {
    #[serde(rename = "vehicleIdentifier")]
    pub vehicle_identifier: String,
    #[serde(rename = "tripId")]
    pub trip_id: String,
    #[serde(rename = "tripGPS")]
    pub points: Vec<GpsPoint>,
}

impl Trip {
    pub fn start_point(&self) -> Option<&GpsPoint> {
        self.points.first()
    }

    pub fn end_point(&self) -> Option<&GpsPoint> {
        self.points.last()
    }
}
