use thiserror::Error;

/// Failures surfaced by the geocoding and forecast pipeline.
///
/// Messages are meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeteoError {
    #[error("Please enter a city name.")]
    EmptyQuery,

    #[error("No location found for '{query}'.")]
    NotFound { query: String },

    #[error("No current weather data available for this location.")]
    NoData,

    #[error("Network error: {0}")]
    Network(String),
}

impl MeteoError {
    /// True when the user can fix the problem by changing the input.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, MeteoError::EmptyQuery | MeteoError::NotFound { .. })
    }
}

impl From<reqwest::Error> for MeteoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MeteoError::Network(format!("request timed out: {err}"))
        } else {
            MeteoError::Network(err.to_string())
        }
    }
}

pub type MeteoResult<T> = std::result::Result<T, MeteoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_query() {
        let err = MeteoError::NotFound { query: "Atlantis".into() };
        assert_eq!(err.to_string(), "No location found for 'Atlantis'.");
        assert!(err.is_user_correctable());
    }

    #[test]
    fn network_and_no_data_are_not_user_correctable() {
        assert!(!MeteoError::NoData.is_user_correctable());
        assert!(!MeteoError::Network("boom".into()).is_user_correctable());
    }
}
