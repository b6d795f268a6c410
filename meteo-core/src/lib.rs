//! Core library for the `meteo` app.
//!
//! This crate defines:
//! - Geocoding of city names and retrieval of current weather (Open-Meteo)
//! - The weather-code to theme/animation table
//! - Per-screen state machines for the search and weather screens
//! - Preset locations and configuration
//!
//! It is used by `meteo-cli`, but has no terminal or UI dependencies of its own.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod presentation;
pub mod preset;
pub mod provider;
pub mod screen;

pub use config::Config;
pub use error::{MeteoError, MeteoResult};
pub use model::{LocationQuery, ResolvedLocation, WeatherObservation, WeatherReport};
pub use pipeline::WeatherPipeline;
pub use presentation::{AnimationAsset, PresentationBundle, Rgba, WeatherTheme, present};
pub use preset::PresetLocation;
pub use provider::{ForecastSource, Geocoder, OpenMeteoClient};
pub use screen::{LoadTicket, ScreenState, SearchScreen, SearchState, WeatherScreen};
