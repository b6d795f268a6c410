use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MeteoError, MeteoResult},
    presentation::{PresentationBundle, present},
};

/// Free-text city name typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Rejects empty and whitespace-only input. The accepted text is kept unmodified.
    pub fn new(raw: impl Into<String>) -> MeteoResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(MeteoError::EmptyQuery);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for LocationQuery {
    type Error = MeteoError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A city name paired with its coordinates.
///
/// This is the parameter bundle handed from the search screen to the weather screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub city_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    pub fn new(city_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { city_name: city_name.into(), latitude, longitude }
    }
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Local wall-clock time of the sample (service time shifted by the UTC offset).
    pub observed_at: NaiveDateTime,
    /// Full precision; see [`WeatherObservation::rounded_temperature`].
    pub temperature_celsius: f64,
    pub weather_code: i32,
}

impl WeatherObservation {
    /// Temperature rounded to the nearest whole degree for display.
    pub fn rounded_temperature(&self) -> i64 {
        self.temperature_celsius.round() as i64
    }

    pub fn presentation(&self) -> PresentationBundle {
        present(self.weather_code)
    }
}

/// Everything the weather screen renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: ResolvedLocation,
    pub observation: WeatherObservation,
}

impl WeatherReport {
    pub fn presentation(&self) -> PresentationBundle {
        self.observation.presentation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn observation(temp: f64) -> WeatherObservation {
        WeatherObservation {
            observed_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc(),
            temperature_celsius: temp,
            weather_code: 0,
        }
    }

    #[test]
    fn blank_queries_are_rejected() {
        assert_eq!(LocationQuery::new(""), Err(MeteoError::EmptyQuery));
        assert_eq!(LocationQuery::new("   \t"), Err(MeteoError::EmptyQuery));
    }

    #[test]
    fn query_text_is_kept_unmodified() {
        let q = LocationQuery::new(" New York ").unwrap();
        assert_eq!(q.as_str(), " New York ");
    }

    #[test]
    fn rounding_happens_only_for_display() {
        let obs = observation(21.5);
        assert_eq!(obs.rounded_temperature(), 22);
        assert_eq!(obs.temperature_celsius, 21.5);

        assert_eq!(observation(21.4).rounded_temperature(), 21);
        assert_eq!(observation(-3.6).rounded_temperature(), -4);
        assert_eq!(observation(-0.3).rounded_temperature(), 0);
    }

    #[test]
    fn resolved_location_serializes_as_navigation_params() {
        let loc = ResolvedLocation::new("Sydney", -33.9, 151.2);
        let json = serde_json::to_value(&loc).unwrap();

        assert_eq!(json["city_name"], "Sydney");
        assert_eq!(json["latitude"], -33.9);

        let back: ResolvedLocation = serde_json::from_value(json).unwrap();
        assert_eq!(back, loc);
    }
}
