use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::{collections::HashMap, time::Duration};

use crate::{
    Config, LocationQuery, ResolvedLocation, WeatherObservation,
    error::{MeteoError, MeteoResult},
    provider::{CurrentSample, ForecastSource, Geocoder, REQUESTED_VARIABLES, current_param},
};

pub const DEFAULT_GEOCODING_HOST: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_HOST: &str = "https://api.open-meteo.com";

/// HTTP client for the Open-Meteo geocoding and forecast services.
///
/// Stateless apart from the connection pool: every call is a fresh request.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_host: String,
    forecast_host: String,
    language: String,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_hosts(DEFAULT_GEOCODING_HOST, DEFAULT_FORECAST_HOST)
    }

    /// Point the client at other hosts, e.g. a local mock server.
    pub fn with_hosts(geocoding_host: impl Into<String>, forecast_host: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            geocoding_host: geocoding_host.into(),
            forecast_host: forecast_host.into(),
            language: "en".to_string(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            geocoding_host: config.geocoding_host.clone(),
            forecast_host: config.forecast_host.clone(),
            language: config.language.clone(),
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn search_url(&self) -> String {
        format!("{}/v1/search", self.geocoding_host.trim_end_matches('/'))
    }

    fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.forecast_host.trim_end_matches('/'))
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    #[serde(default)]
    results: Option<Vec<OmGeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i64,
    #[serde(default)]
    current: Option<OmCurrent>,
}

/// The JSON API labels current values by name; they are re-indexed by request order.
#[derive(Debug, Deserialize)]
struct OmCurrent {
    #[serde(default)]
    time: Option<i64>,
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl OmForecastResponse {
    fn into_sample(self) -> Option<CurrentSample> {
        let current = self.current?;
        let time = current.time?;
        let values = REQUESTED_VARIABLES
            .iter()
            .map(|var| current.values.get(var.as_str()).and_then(serde_json::Value::as_f64))
            .collect();

        Some(CurrentSample::new(time, self.utc_offset_seconds, values))
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn resolve(&self, query: &LocationQuery) -> MeteoResult<ResolvedLocation> {
        tracing::debug!(city = query.as_str(), "Sending geocoding request");

        let res = self
            .http
            .get(self.search_url())
            .query(&[
                ("name", query.as_str()),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body = read_success_body(res, "geocoding").await?;

        let parsed: OmGeocodingResponse = serde_json::from_str(&body).map_err(|e| {
            MeteoError::Network(format!("Failed to parse geocoding JSON: {e}"))
        })?;

        let first = parsed.results.and_then(|r| r.into_iter().next()).ok_or_else(|| {
            tracing::warn!(city = query.as_str(), "Geocoding returned no results");
            MeteoError::NotFound { query: query.as_str().to_string() }
        })?;

        let location = ResolvedLocation::new(query.as_str(), first.latitude, first.longitude);
        tracing::info!(
            city = %location.city_name,
            latitude = location.latitude,
            longitude = location.longitude,
            "Resolved location"
        );

        Ok(location)
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn fetch_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> MeteoResult<WeatherObservation> {
        tracing::debug!(latitude, longitude, "Sending forecast request");

        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", current_param(&REQUESTED_VARIABLES)),
                ("timeformat", "unixtime".to_string()),
            ])
            .send()
            .await?;

        let body = read_success_body(res, "forecast").await?;

        let parsed: OmForecastResponse = serde_json::from_str(&body)
            .map_err(|e| MeteoError::Network(format!("Failed to parse forecast JSON: {e}")))?;

        let sample = parsed.into_sample().ok_or_else(|| {
            tracing::warn!(latitude, longitude, "Forecast response has no current block");
            MeteoError::NoData
        })?;

        let observation = sample.into_observation().inspect_err(|_| {
            tracing::warn!(latitude, longitude, "Forecast response is missing requested variables");
        })?;

        tracing::info!(
            temperature = observation.temperature_celsius,
            code = observation.weather_code,
            "Fetched current weather"
        );

        Ok(observation)
    }
}

async fn read_success_body(res: Response, what: &str) -> MeteoResult<String> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| MeteoError::Network(format!("Failed to read {what} response body: {e}")))?;

    if !status.is_success() {
        return Err(MeteoError::Network(format!(
            "{what} request failed with status {status}: {}",
            truncate_body(&body),
        )));
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
