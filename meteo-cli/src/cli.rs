use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Select, Text};
use meteo_core::{
    Config, PresetLocation, ResolvedLocation, ScreenState, SearchScreen, WeatherPipeline,
    WeatherScreen,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Current weather for a city")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up the coordinates of a city.
    Search {
        city: String,
    },

    /// Show current weather for a city or preset location.
    ///
    /// With no arguments, uses the configured default preset or asks for a city.
    Show {
        city: Option<String>,

        /// Preset location, e.g. "randwick" or "chennai".
        #[arg(long, conflicts_with = "city")]
        preset: Option<String>,
    },

    /// List preset locations.
    Presets,

    /// Interactively edit the configuration.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command {
            Command::Search { city } => {
                let pipeline = WeatherPipeline::from_config(&config)?;
                let mut search = SearchScreen::new();
                match search.submit(pipeline.geocoder(), &city).await {
                    Some(location) => println!("{}", render::location_text(&location)),
                    None => return Err(anyhow!(search.error_text().unwrap_or_default())),
                }
            }
            Command::Show { city, preset } => {
                let pipeline = WeatherPipeline::from_config(&config)?;
                let Some(location) = pick_location(&pipeline, &config, city, preset).await? else {
                    return Ok(());
                };
                show_weather(&pipeline, location).await?;
            }
            Command::Presets => {
                println!("{}", render::presets_text());
            }
            Command::Configure => {
                let path = match self.config {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                configure(config, &path)?;
                println!("Configuration saved to {}", path.display());
            }
        }

        Ok(())
    }
}

/// Resolve which location to show. `None` means the user backed out of the prompt.
async fn pick_location(
    pipeline: &WeatherPipeline,
    config: &Config,
    city: Option<String>,
    preset: Option<String>,
) -> anyhow::Result<Option<ResolvedLocation>> {
    if let Some(name) = preset {
        return Ok(Some(PresetLocation::try_from(name.as_str())?.location()));
    }

    let mut search = SearchScreen::new();

    if let Some(city) = city {
        return match search.submit(pipeline.geocoder(), &city).await {
            Some(location) => Ok(Some(location)),
            None => Err(anyhow!(search.error_text().unwrap_or_default())),
        };
    }

    if let Some(preset) = config.default_preset()? {
        return Ok(Some(preset.location()));
    }

    // Entry screen: keep asking until a city resolves or the user cancels.
    loop {
        let input = match Text::new("Enter your location:").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(location) = search.submit(pipeline.geocoder(), &input).await {
            return Ok(Some(location));
        }
        if let Some(msg) = search.error_text() {
            eprintln!("{msg}");
        }
        search.edit();
    }
}

async fn show_weather(
    pipeline: &WeatherPipeline,
    location: ResolvedLocation,
) -> anyhow::Result<()> {
    let city = location.city_name.clone();
    let mut screen = WeatherScreen::new();

    match screen.load(pipeline.forecast(), location).await {
        ScreenState::Failed { error, .. } => Err(anyhow::Error::new(error.clone())
            .context(format!("Failed to load weather for {city}"))),
        state => {
            println!("{}", render::weather_screen(state));
            Ok(())
        }
    }
}

/// Enter keeps the saved timeout; Esc falls back to the client default.
fn timeout_prompt(current: Option<u64>) -> CustomType<'static, u64> {
    let prompt = CustomType::<u64>::new("Request timeout in seconds (Esc for the client default):")
        .with_error_message("Please enter a whole number of seconds");

    match current {
        Some(secs) => prompt.with_default(secs),
        None => prompt,
    }
}

fn configure(mut config: Config, path: &std::path::Path) -> anyhow::Result<()> {
    config.geocoding_host = Text::new("Geocoding host:")
        .with_default(&config.geocoding_host)
        .prompt()?;

    config.forecast_host =
        Text::new("Forecast host:").with_default(&config.forecast_host).prompt()?;

    config.language =
        Text::new("Language for place names:").with_default(&config.language).prompt()?;

    config.request_timeout_secs = timeout_prompt(config.request_timeout_secs).prompt_skippable()?;

    let mut choices = vec!["none"];
    choices.extend(PresetLocation::all().iter().map(PresetLocation::as_str));
    let choice = Select::new("Default preset for `meteo show`:", choices).prompt()?;

    let preset = match choice {
        "none" => None,
        name => Some(PresetLocation::try_from(name)?),
    };
    config.set_default_preset(preset);

    config.save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_prompt_is_seeded_with_saved_value() {
        assert_eq!(timeout_prompt(Some(30)).default, Some(30));
    }

    #[test]
    fn timeout_prompt_has_no_default_when_unset() {
        assert_eq!(timeout_prompt(None).default, None);
    }
}
