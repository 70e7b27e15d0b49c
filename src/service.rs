use std::sync::RwLock;

use serde::Serialize;
use thiserror::Error;

use crate::geocoding::{GeocodeError, ReverseGeocode};
use crate::speed::{self, SpeedError};
use crate::trip::{GpsPoint, Trip};
use crate::trip_store::TripStore;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("trip not found")]
    TripNotFound,
    #[error("vehicle not found")]
    VehicleNotFound,
    /// Postcodes were requested for a stored trip that has no GPS points.
    #[error("trip has no GPS points")]
    EmptyTrip,
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error(transparent)]
    Speed(#[from] SpeedError),
}

/// One row of a vehicle's trip history. Start postcode serializes before end.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripSummary {
    pub trip_id: String,
    pub start_postcode: String,
    pub end_postcode: String,
    pub average_speed: f64,
}

/// Answers the four trip questions by composing the store, the speed
/// calculator and the geocoder. Owns the only mutable shared state in the
/// process: the trip store, behind a single lock covering both of its
/// indexes.
pub struct TripService {
    store: RwLock<TripStore>,
    geocoder: Box<dyn ReverseGeocode>,
}

impl TripService {
    pub fn new(geocoder: Box<dyn ReverseGeocode>) -> Self {
        TripService {
            store: RwLock::new(TripStore::new()),
            geocoder,
        }
    }

    /// Stores a batch of trips. The write guard is held for the whole batch,
    /// so a batch becomes visible to readers all at once.
    pub fn add_trips(&self, trips: Vec<Trip>) {
        let count = trips.len();
        self.store.write().unwrap().ingest(trips);
        info!("ingested {} trips", count);
    }

    /// Postcodes of the trip's first and last fix, in that order. Either
    /// lookup failing fails the whole operation.
    pub async fn trip_postcodes(&self, trip_id: &str) -> Result<(String, String), ServiceError> {
        // copy the two fixes out so the store lock is not held across the
        // provider round-trips
        let (start, end) = {
            let store = self.store.read().unwrap();
            let trip = store.get_by_id(trip_id).ok_or(ServiceError::TripNotFound)?;
            match (trip.start_point(), trip.end_point()) {
                (Some(start), Some(end)) => (*start, *end),
                _ => return Err(ServiceError::EmptyTrip),
            }
        };

        let start_postcode = self.geocoder.reverse_geocode(&start).await?;
        let end_postcode = self.geocoder.reverse_geocode(&end).await?;
        Ok((start_postcode, end_postcode))
    }

    /// Per-segment speeds for one trip. Empty for a trip with fewer than 2
    /// points, which is not an error at this layer.
    pub async fn trip_speeds(&self, trip_id: &str) -> Result<Vec<f64>, ServiceError> {
        let trip = {
            let store = self.store.read().unwrap();
            store
                .get_by_id(trip_id)
                .cloned()
                .ok_or(ServiceError::TripNotFound)?
        };
        Ok(speed::trip_speeds(&trip)?)
    }

    /// All trips of one vehicle, summarized, in ingestion order. Best-effort
    /// per trip: a failed postcode lookup becomes an empty label and a
    /// degenerate trip gets an average of 0.0, so one bad trip never voids
    /// the whole history.
    pub async fn vehicle_trips(&self, vehicle_id: &str) -> Result<Vec<TripSummary>, ServiceError> {
        let trips: Vec<Trip> = {
            let store = self.store.read().unwrap();
            store
                .get_by_vehicle(vehicle_id)
                .map(|trips| trips.to_vec())
                .ok_or(ServiceError::VehicleNotFound)?
        };

        let mut summaries = Vec::with_capacity(trips.len());
        for trip in &trips {
            summaries.push(self.summarize(trip).await);
        }
        Ok(summaries)
    }

    async fn summarize(&self, trip: &Trip) -> TripSummary {
        let start_postcode = self.best_effort_postcode(trip.start_point()).await;
        let end_postcode = self.best_effort_postcode(trip.end_point()).await;
        let average_speed = match speed::average_speed_kmh(trip) {
            Ok(speed) => speed,
            Err(err) => {
                warn!("no average speed for trip {}: {}", trip.trip_id, err);
                0.0
            }
        };
        TripSummary {
            trip_id: trip.trip_id.clone(),
            start_postcode,
            end_postcode,
            average_speed,
        }
    }

    async fn best_effort_postcode(&self, point: Option<&GpsPoint>) -> String {
        let point = match point {
            Some(point) => point,
            None => return String::new(),
        };
        match self.geocoder.reverse_geocode(point).await {
            Ok(postcode) => postcode,
            Err(err) => {
                warn!("postcode lookup failed, leaving label empty: {}", err);
                String::new()
            }
        }
    }
}
