//! aggregates per-edge, time-of-day traffic counts from simulated commute routes
//! into an [`model::IntensityMap`], persists it as a pipe-delimited flat file
//! and renders it as a ten-level GeoJSON load map.
pub mod app;
pub mod config;
pub mod io;
pub mod model;
