use itertools::Itertools;
use thiserror::Error;

use crate::trip::{GpsPoint, Trip};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Milliseconds per hour, for converting fix timestamp deltas.
const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpeedError {
    /// Two consecutive fixes share a timestamp, so the segment has no
    /// duration to divide by.
    #[error("zero-duration segment")]
    ZeroDurationSegment,
    /// An average was requested for a trip with fewer than 2 points.
    #[error("not enough GPS points to compute a speed")]
    InsufficientData,
}

/// Great-circle distance between two fixes in kilometers, haversine formula.
pub fn haversine_distance_km(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let d_lat = (p2.latitude - p1.latitude).to_radians();
    let d_lng = (p2.longitude - p1.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + p1.latitude.to_radians().cos() * p2.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Round to 2 decimal places, ties away from zero.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Speed over one segment in km/h, rounded to 2 decimal places. Fixes with
/// equal timestamps are rejected instead of producing an infinite speed.
pub fn segment_speed_kmh(p1: &GpsPoint, p2: &GpsPoint) -> Result<f64, SpeedError> {
    if p2.timestamp_ms == p1.timestamp_ms {
        return Err(SpeedError::ZeroDurationSegment);
    }
    let distance_km = haversine_distance_km(p1, p2);
    let elapsed_hours = (p2.timestamp_ms - p1.timestamp_ms) as f64 / MS_PER_HOUR;
    Ok(round_2dp(distance_km / elapsed_hours))
}

/// One speed per consecutive pair of fixes, so `points.len() - 1` values.
/// A trip with fewer than 2 points yields an empty vec, not an error.
pub fn trip_speeds(trip: &Trip) -> Result<Vec<f64>, SpeedError> {
    trip.points
        .iter()
        .tuple_windows()
        .map(|(p1, p2)| segment_speed_kmh(p1, p2))
        .collect()
}

/// Arithmetic mean of the segment speeds, rounded to 2 decimal places.
/// `InsufficientData` for trips with fewer than 2 points, where the mean
/// would be a division by zero.
pub fn average_speed_kmh(trip: &Trip) -> Result<f64, SpeedError> {
    let speeds = trip_speeds(trip)?;
    if speeds.is_empty() {
        return Err(SpeedError::InsufficientData);
    }
    let total: f64 = speeds.iter().sum();
    Ok(round_2dp(total / speeds.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::round_2dp;

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 0.125 * 100 is exactly 12.5, a true tie in binary
        assert_eq!(round_2dp(0.125), 0.13);
        assert_eq!(round_2dp(-0.125), -0.13);
        assert_eq!(round_2dp(2.344), 2.34);
        assert_eq!(round_2dp(2.346), 2.35);
        assert_eq!(round_2dp(0.0), 0.0);
    }
}
