use std::sync::Arc;

use crate::{
    Config, LocationQuery, ResolvedLocation, WeatherReport,
    error::MeteoResult,
    provider::{ForecastSource, Geocoder, OpenMeteoClient},
};

/// City name in, rendered-ready weather out.
///
/// One flow for every screen variant: callers either resolve a typed name or
/// hand in a preset location directly.
#[derive(Debug, Clone)]
pub struct WeatherPipeline {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastSource>,
}

impl WeatherPipeline {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecast: Arc<dyn ForecastSource>) -> Self {
        Self { geocoder, forecast }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Arc::new(OpenMeteoClient::from_config(config)?);
        Ok(Self::new(client.clone(), client))
    }

    pub fn geocoder(&self) -> &dyn Geocoder {
        self.geocoder.as_ref()
    }

    pub fn forecast(&self) -> &dyn ForecastSource {
        self.forecast.as_ref()
    }

    pub async fn resolve(&self, city: &str) -> MeteoResult<ResolvedLocation> {
        let query = LocationQuery::new(city)?;
        self.geocoder.resolve(&query).await
    }

    pub async fn fetch(&self, location: ResolvedLocation) -> MeteoResult<WeatherReport> {
        let observation =
            self.forecast.fetch_current_weather(location.latitude, location.longitude).await?;
        Ok(WeatherReport { location, observation })
    }

    /// Geocode, then fetch. The forecast request starts only after geocoding succeeded.
    pub async fn lookup(&self, city: &str) -> MeteoResult<WeatherReport> {
        let location = self.resolve(city).await?;
        self.fetch(location).await
    }
}
