use crate::{
    LocationQuery, ResolvedLocation, WeatherObservation,
    error::{MeteoError, MeteoResult},
};
use async_trait::async_trait;
use chrono::DateTime;
use std::fmt::Debug;

pub mod openmeteo;

pub use openmeteo::OpenMeteoClient;

/// Turns a city name into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, query: &LocationQuery) -> MeteoResult<ResolvedLocation>;
}

/// Fetches current conditions for a coordinate pair.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> MeteoResult<WeatherObservation>;
}

/// A variable of the forecast service's "current" block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentVariable {
    Temperature2m,
    WeatherCode,
}

impl CurrentVariable {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentVariable::Temperature2m => "temperature_2m",
            CurrentVariable::WeatherCode => "weather_code",
        }
    }
}

impl std::fmt::Display for CurrentVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variables requested from the forecast service, in request order.
pub const REQUESTED_VARIABLES: [CurrentVariable; 2] =
    [CurrentVariable::Temperature2m, CurrentVariable::WeatherCode];

const TEMPERATURE_INDEX: usize = 0;
const WEATHER_CODE_INDEX: usize = 1;

/// Comma-joined variable names for the `current` query parameter.
pub fn current_param(variables: &[CurrentVariable]) -> String {
    variables.iter().map(CurrentVariable::as_str).collect::<Vec<_>>().join(",")
}

/// A decoded "current" sample. Values are addressed by the zero-based index of
/// the variable in the request, not by name.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSample {
    /// Epoch seconds, UTC.
    pub time: i64,
    pub utc_offset_seconds: i64,
    values: Vec<Option<f64>>,
}

impl CurrentSample {
    /// `values[i]` must hold the value of the i-th requested variable.
    pub fn new(time: i64, utc_offset_seconds: i64, values: Vec<Option<f64>>) -> Self {
        Self { time, utc_offset_seconds, values }
    }

    pub fn variable(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds an observation from a sample requested with [`REQUESTED_VARIABLES`].
    pub fn into_observation(self) -> MeteoResult<WeatherObservation> {
        let temperature_celsius = self.variable(TEMPERATURE_INDEX).ok_or(MeteoError::NoData)?;
        let code = self.variable(WEATHER_CODE_INDEX).ok_or(MeteoError::NoData)?;

        if !temperature_celsius.is_finite() || !code.is_finite() {
            return Err(MeteoError::NoData);
        }

        let local_epoch = self.time.checked_add(self.utc_offset_seconds).ok_or(MeteoError::NoData)?;
        let observed_at =
            DateTime::from_timestamp(local_epoch, 0).ok_or(MeteoError::NoData)?.naive_utc();

        Ok(WeatherObservation {
            observed_at,
            temperature_celsius,
            weather_code: code.round() as i32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_param_keeps_request_order() {
        assert_eq!(current_param(&REQUESTED_VARIABLES), "temperature_2m,weather_code");
        assert_eq!(
            current_param(&[CurrentVariable::WeatherCode, CurrentVariable::Temperature2m]),
            "weather_code,temperature_2m"
        );
    }

    #[test]
    fn observation_applies_utc_offset() {
        let sample = CurrentSample::new(1_700_000_000, 36_000, vec![Some(21.4), Some(3.0)]);
        let obs = sample.into_observation().expect("complete sample");

        let expected = DateTime::from_timestamp(1_700_036_000, 0).unwrap().naive_utc();
        assert_eq!(obs.observed_at, expected);
        assert_eq!(obs.temperature_celsius, 21.4);
        assert_eq!(obs.weather_code, 3);
    }

    #[test]
    fn negative_offset_moves_time_backwards() {
        let sample = CurrentSample::new(1_700_000_000, -18_000, vec![Some(0.0), Some(0.0)]);
        let obs = sample.into_observation().unwrap();
        let expected = DateTime::from_timestamp(1_699_982_000, 0).unwrap().naive_utc();
        assert_eq!(obs.observed_at, expected);
    }

    #[test]
    fn missing_slot_is_no_data() {
        let only_temp = CurrentSample::new(0, 0, vec![Some(10.0)]);
        assert_eq!(only_temp.into_observation(), Err(MeteoError::NoData));

        let hole = CurrentSample::new(0, 0, vec![None, Some(1.0)]);
        assert_eq!(hole.into_observation(), Err(MeteoError::NoData));

        let nan = CurrentSample::new(0, 0, vec![Some(f64::NAN), Some(1.0)]);
        assert_eq!(nan.into_observation(), Err(MeteoError::NoData));
    }

    #[test]
    fn variable_out_of_range_is_none() {
        let sample = CurrentSample::new(0, 0, vec![Some(1.0)]);
        assert_eq!(sample.variable(0), Some(1.0));
        assert_eq!(sample.variable(1), None);
        assert_eq!(sample.len(), 1);
    }
}
