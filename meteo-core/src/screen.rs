//! Per-screen request lifecycles.
//!
//! Each screen instance owns its state. Weather loads are tagged with a
//! generation ticket; a completion carrying an outdated ticket is dropped.

use crate::{
    LocationQuery, ResolvedLocation, WeatherObservation, WeatherReport,
    error::{MeteoError, MeteoResult},
    provider::{ForecastSource, Geocoder},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenState {
    /// No location yet.
    #[default]
    Idle,
    Loading { location: ResolvedLocation },
    Loaded(WeatherReport),
    Failed { location: ResolvedLocation, error: MeteoError },
}

impl ScreenState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading { .. })
    }

    pub fn location(&self) -> Option<&ResolvedLocation> {
        match self {
            ScreenState::Idle => None,
            ScreenState::Loading { location } | ScreenState::Failed { location, .. } => {
                Some(location)
            }
            ScreenState::Loaded(report) => Some(&report.location),
        }
    }
}

/// Identifies one load started by [`WeatherScreen::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// The weather display screen: `Idle -> Loading -> Loaded | Failed`.
#[derive(Debug, Default)]
pub struct WeatherScreen {
    state: ScreenState,
    generation: u64,
}

impl WeatherScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Enter `Loading` for `location`. Supersedes any load still in flight.
    pub fn begin(&mut self, location: ResolvedLocation) -> LoadTicket {
        self.generation += 1;
        self.state = ScreenState::Loading { location };
        LoadTicket { generation: self.generation }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation && self.state.is_loading()
    }

    /// Apply the outcome of a load. Returns false, leaving the state untouched,
    /// when the ticket is stale.
    pub fn finish(&mut self, ticket: LoadTicket, result: MeteoResult<WeatherObservation>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Ignoring stale weather completion"
            );
            return false;
        }

        let location = match &self.state {
            ScreenState::Loading { location } => location.clone(),
            _ => return false,
        };

        self.state = match result {
            Ok(observation) => ScreenState::Loaded(WeatherReport { location, observation }),
            Err(error) => {
                tracing::warn!(city = %location.city_name, %error, "Weather load failed");
                ScreenState::Failed { location, error }
            }
        };
        true
    }

    /// Tear the screen down. Completions of loads started before this are ignored.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.state = ScreenState::Idle;
    }

    /// Begin a load, fetch, and apply the result.
    pub async fn load(
        &mut self,
        source: &dyn ForecastSource,
        location: ResolvedLocation,
    ) -> &ScreenState {
        let (latitude, longitude) = (location.latitude, location.longitude);
        let ticket = self.begin(location);
        let result = source.fetch_current_weather(latitude, longitude).await;
        self.finish(ticket, result);
        &self.state
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Editing,
    Resolving { query: LocationQuery },
    Resolved(ResolvedLocation),
    /// The user stays on the search screen with this error shown inline.
    Failed(MeteoError),
}

/// The city entry screen. A successful submit yields the navigation bundle.
#[derive(Debug, Default)]
pub struct SearchScreen {
    state: SearchState,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Inline error text, if the last submit failed.
    pub fn error_text(&self) -> Option<String> {
        match &self.state {
            SearchState::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Back to editing, clearing any previous result.
    pub fn edit(&mut self) {
        self.state = SearchState::Editing;
    }

    pub async fn submit(
        &mut self,
        geocoder: &dyn Geocoder,
        input: &str,
    ) -> Option<ResolvedLocation> {
        let query = match LocationQuery::new(input) {
            Ok(q) => q,
            Err(err) => {
                self.state = SearchState::Failed(err);
                return None;
            }
        };

        self.state = SearchState::Resolving { query: query.clone() };

        match geocoder.resolve(&query).await {
            Ok(location) => {
                self.state = SearchState::Resolved(location.clone());
                Some(location)
            }
            Err(err) => {
                self.state = SearchState::Failed(err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sydney() -> ResolvedLocation {
        ResolvedLocation::new("Sydney", -33.9, 151.2)
    }

    fn observation(temp: f64, code: i32) -> WeatherObservation {
        WeatherObservation {
            observed_at: DateTime::from_timestamp(1_700_036_000, 0).unwrap().naive_utc(),
            temperature_celsius: temp,
            weather_code: code,
        }
    }

    #[derive(Debug)]
    struct FakeForecast {
        result: MeteoResult<WeatherObservation>,
        calls: AtomicUsize,
    }

    impl FakeForecast {
        fn new(result: MeteoResult<WeatherObservation>) -> Self {
            Self { result, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl ForecastSource for FakeForecast {
        async fn fetch_current_weather(&self, _: f64, _: f64) -> MeteoResult<WeatherObservation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[derive(Debug)]
    struct FakeGeocoder;

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, query: &LocationQuery) -> MeteoResult<ResolvedLocation> {
            match query.as_str() {
                "Sydney" => Ok(sydney()),
                other => Err(MeteoError::NotFound { query: other.to_string() }),
            }
        }
    }

    #[test]
    fn new_screen_is_idle() {
        let screen = WeatherScreen::new();
        assert_eq!(screen.state(), &ScreenState::Idle);
        assert!(screen.state().location().is_none());
    }

    #[test]
    fn begin_enters_loading() {
        let mut screen = WeatherScreen::new();
        let ticket = screen.begin(sydney());

        assert!(screen.state().is_loading());
        assert!(screen.is_current(ticket));
        assert_eq!(screen.state().location(), Some(&sydney()));
    }

    #[test]
    fn finish_with_observation_loads() {
        let mut screen = WeatherScreen::new();
        let ticket = screen.begin(sydney());

        assert!(screen.finish(ticket, Ok(observation(21.4, 3))));
        match screen.state() {
            ScreenState::Loaded(report) => {
                assert_eq!(report.location, sydney());
                assert_eq!(report.observation.weather_code, 3);
            }
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn finish_with_error_fails_instead_of_hanging() {
        let mut screen = WeatherScreen::new();
        let ticket = screen.begin(sydney());

        assert!(screen.finish(ticket, Err(MeteoError::NoData)));
        assert_eq!(
            screen.state(),
            &ScreenState::Failed { location: sydney(), error: MeteoError::NoData }
        );
    }

    #[test]
    fn superseded_completion_is_ignored() {
        let mut screen = WeatherScreen::new();
        let first = screen.begin(sydney());
        let paris = ResolvedLocation::new("Paris", 48.85, 2.35);
        let second = screen.begin(paris.clone());

        assert!(!screen.finish(first, Ok(observation(10.0, 0))));
        assert_eq!(screen.state(), &ScreenState::Loading { location: paris.clone() });

        assert!(screen.finish(second, Ok(observation(12.0, 61))));
        assert_eq!(screen.state().location(), Some(&paris));
    }

    #[test]
    fn completion_after_unmount_is_a_no_op() {
        let mut screen = WeatherScreen::new();
        let ticket = screen.begin(sydney());
        screen.unmount();

        assert!(!screen.finish(ticket, Ok(observation(21.4, 3))));
        assert_eq!(screen.state(), &ScreenState::Idle);
    }

    #[test]
    fn a_ticket_applies_only_once() {
        let mut screen = WeatherScreen::new();
        let ticket = screen.begin(sydney());

        assert!(screen.finish(ticket, Ok(observation(21.4, 3))));
        assert!(!screen.finish(ticket, Err(MeteoError::NoData)));
        assert!(matches!(screen.state(), ScreenState::Loaded(_)));
    }

    #[test]
    fn failed_screen_can_be_reloaded() {
        let mut screen = WeatherScreen::new();
        let ticket = screen.begin(sydney());
        screen.finish(ticket, Err(MeteoError::Network("offline".into())));

        let ticket = screen.begin(sydney());
        assert!(screen.state().is_loading());
        assert!(screen.finish(ticket, Ok(observation(20.0, 0))));
    }

    #[tokio::test]
    async fn load_fetches_every_time() {
        let source = FakeForecast::new(Ok(observation(21.4, 3)));
        let mut screen = WeatherScreen::new();

        screen.load(&source, sydney()).await;
        let state = screen.load(&source, sydney()).await;

        assert!(matches!(state, ScreenState::Loaded(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn search_success_yields_navigation_bundle() {
        let mut search = SearchScreen::new();
        let loc = search.submit(&FakeGeocoder, "Sydney").await;

        assert_eq!(loc, Some(sydney()));
        assert_eq!(search.state(), &SearchState::Resolved(sydney()));
        assert!(search.error_text().is_none());
    }

    #[tokio::test]
    async fn search_failure_stays_on_screen_with_inline_error() {
        let mut search = SearchScreen::new();
        let loc = search.submit(&FakeGeocoder, "Atlantis").await;

        assert!(loc.is_none());
        assert_eq!(search.error_text().as_deref(), Some("No location found for 'Atlantis'."));

        search.edit();
        assert_eq!(search.state(), &SearchState::Editing);
    }

    #[tokio::test]
    async fn blank_search_is_rejected_before_any_request() {
        let mut search = SearchScreen::new();
        assert!(search.submit(&FakeGeocoder, "  ").await.is_none());
        assert_eq!(search.state(), &SearchState::Failed(MeteoError::EmptyQuery));
    }
}
