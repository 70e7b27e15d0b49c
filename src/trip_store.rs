use std::collections::HashMap;

use crate::trip::Trip;

/// In-memory trip collection with two indexes over the same data: one by
/// trip id, one by vehicle id. The by-vehicle index is derived from the same
/// ingestion path, so both live in this single struct and the caller guards
/// them with one lock. Never split these into independently locked maps.
#[derive(Debug, Default)]
pub struct TripStore {
    trips: HashMap<String, Trip>,
    vehicle_trips: HashMap<String, Vec<Trip>>,
}

impl TripStore {
    pub fn new() -> Self {
        TripStore {
            trips: HashMap::new(),
            vehicle_trips: HashMap::new(),
        }
    }

    /// Upserts each trip into the by-id index (last write wins) and appends
    /// it to the by-vehicle index (duplicates kept, ingestion order
    /// preserved). No validation of the GPS data itself: a trip with no
    /// points is stored as-is and only fails later when a speed or postcode
    /// is requested.
    pub fn ingest(&mut self, trips: Vec<Trip>) {
        for trip in trips {
            self.vehicle_trips
                .entry(trip.vehicle_identifier.clone())
                .or_default()
                .push(trip.clone());
            self.trips.insert(trip.trip_id.clone(), trip);
        }
    }

    pub fn get_by_id(&self, trip_id: &str) -> Option<&Trip> {
        self.trips.get(trip_id)
    }

    pub fn get_by_vehicle(&self, vehicle_id: &str) -> Option<&[Trip]> {
        self.vehicle_trips.get(vehicle_id).map(|x| x.as_slice())
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
