use actix_web::{error, web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::service::{ServiceError, TripService};
use crate::trip::Trip;

// Using a struct to keep start_postcode before end_postcode in the
// serialized body.
#[derive(Serialize)]
struct PostcodesResponse {
    start_postcode: String,
    end_postcode: String,
}

fn error_to_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::TripNotFound | ServiceError::VehicleNotFound => {
            HttpResponse::NotFound().json(json!({"error": err.to_string()}))
        }
        ServiceError::EmptyTrip | ServiceError::Speed(_) => {
            HttpResponse::UnprocessableEntity().json(json!({"error": err.to_string()}))
        }
        ServiceError::Geocode(_) => {
            error!("geocoding failed: {}", err);
            HttpResponse::InternalServerError().json(json!({"error": err.to_string()}))
        }
    }
}

async fn add_trips(
    trips: web::Json<Vec<Trip>>,
    service: web::Data<TripService>,
) -> HttpResponse {
    service.add_trips(trips.into_inner());
    HttpResponse::Ok().json(json!({"status": "trips added"}))
}

async fn trip_postcodes(
    trip_id: web::Path<String>,
    service: web::Data<TripService>,
) -> HttpResponse {
    match service.trip_postcodes(&trip_id).await {
        Ok((start_postcode, end_postcode)) => HttpResponse::Ok().json(PostcodesResponse {
            start_postcode,
            end_postcode,
        }),
        Err(err) => error_to_response(&err),
    }
}

async fn trip_speeds(
    trip_id: web::Path<String>,
    service: web::Data<TripService>,
) -> HttpResponse {
    match service.trip_speeds(&trip_id).await {
        Ok(speeds) => HttpResponse::Ok().json(json!({"speeds": speeds})),
        Err(err) => error_to_response(&err),
    }
}

async fn vehicle_trips(
    vehicle_id: web::Path<String>,
    service: web::Data<TripService>,
) -> HttpResponse {
    match service.vehicle_trips(&vehicle_id).await {
        Ok(trips) => HttpResponse::Ok().json(json!({"trips": trips})),
        Err(err) => error_to_response(&err),
    }
}

// A structurally invalid ingestion body is a client error, answered with the
// same `{"error": ...}` shape as everything else.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let message = err.to_string();
    error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({"error": message})),
    )
    .into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/trips", web::post().to(add_trips))
        .route("/trips/{id}/postcodes", web::get().to(trip_postcodes))
        .route("/trips/{id}/speeds", web::get().to(trip_speeds))
        .route("/vehicles/{id}/trips", web::get().to(vehicle_trips));
}
