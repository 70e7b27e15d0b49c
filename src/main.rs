use std::env;

use actix_web::dev::Service;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use log::info;

use trip_service::geocoding::{MapboxGeocoder, DEFAULT_API_URL};
use trip_service::server;
use trip_service::service::TripService;

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    let access_token = env::var("MAPBOX_TOKEN").context("MAPBOX_TOKEN is not set")?;
    let base_url = env::var("MAPBOX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = match env::var("PORT") {
        Ok(port) => port.parse().context("PORT is not a valid port number")?,
        Err(_) => 8080,
    };

    let geocoder = MapboxGeocoder::new(&base_url, &access_token)?;
    let service = web::Data::new(TripService::new(Box::new(geocoder)));

    info!("starting server on {}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap_fn(|req, srv| {
                info!("{} {}", req.method(), req.uri());
                srv.call(req)
            })
            .configure(server::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
