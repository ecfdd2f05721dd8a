//! Shared Dioxus state and components for the disaster-risk dashboards.
//!
//! This crate provides:
//! - `state`: reactive `AppState` signals plus the non-reactive `Services`
//! - `cell`: lets the async drivers update a workflow held in a `Signal`
//! - `geolocation`: the browser `Geolocator`
//! - `components`: reusable RSX panels (coordinates, saved paths, results...)

pub mod cell;
pub mod components;
pub mod geolocation;
pub mod state;
