#![allow(dead_code)]

use async_trait::async_trait;

use trip_service::geocoding::{GeocodeError, ReverseGeocode};
use trip_service::trip::{GpsPoint, Trip};

pub fn point(latitude: f64, longitude: f64, timestamp_ms: i64) -> GpsPoint {
    GpsPoint {
        latitude,
        longitude,
        timestamp_ms,
    }
}

pub fn trip(trip_id: &str, vehicle_identifier: &str, points: Vec<GpsPoint>) -> Trip {
    Trip {
        vehicle_identifier: vehicle_identifier.to_string(),
        trip_id: trip_id.to_string(),
        points,
    }
}

// Two fixes one second apart, a few meters from each other.
pub fn short_hop_trip(trip_id: &str, vehicle_identifier: &str) -> Trip {
    trip(
        trip_id,
        vehicle_identifier,
        vec![
            point(51.558902, 0.453003, 1615186800000),
            point(51.558934, 0.452974, 1615186801000),
        ],
    )
}

/// Geocoder double that answers every lookup with the same label.
pub struct FixedGeocoder {
    label: String,
}

impl FixedGeocoder {
    pub fn new(label: &str) -> Self {
        FixedGeocoder {
            label: label.to_string(),
        }
    }
}

#[async_trait]
impl ReverseGeocode for FixedGeocoder {
    async fn reverse_geocode(&self, _point: &GpsPoint) -> Result<String, GeocodeError> {
        Ok(self.label.clone())
    }
}

/// Geocoder double that fails every lookup.
pub struct FailingGeocoder;

#[async_trait]
impl ReverseGeocode for FailingGeocoder {
    async fn reverse_geocode(&self, _point: &GpsPoint) -> Result<String, GeocodeError> {
        Err(GeocodeError::LookupFailed(
            "provider unreachable".to_string(),
        ))
    }
}
