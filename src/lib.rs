#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;

pub mod geocoding;
pub mod server;
pub mod service;
pub mod speed;
pub mod trip;
pub mod trip_store;
