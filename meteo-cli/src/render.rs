use meteo_core::{PresetLocation, ResolvedLocation, ScreenState, WeatherReport};

/// Text of the weather screen for a given state.
pub fn weather_screen(state: &ScreenState) -> String {
    match state {
        ScreenState::Idle => "No location selected.".to_string(),
        ScreenState::Loading { location } => format!("{}\nLoading...", location.city_name),
        ScreenState::Loaded(report) => report_text(report),
        ScreenState::Failed { location, error } => {
            format!("{}\n{error}", location.city_name)
        }
    }
}

pub fn report_text(report: &WeatherReport) -> String {
    let obs = &report.observation;
    let bundle = report.presentation();
    let gradient =
        bundle.gradient.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");

    format!(
        "{city}\n{temp}°C\n{date}\n{theme} (code {code})\n\
         gradient:  {gradient}\nanimation: {animation}",
        city = report.location.city_name,
        temp = obs.rounded_temperature(),
        date = obs.observed_at.format("%a %b %d %Y"),
        theme = bundle.theme,
        code = obs.weather_code,
        animation = bundle.animation,
    )
}

pub fn location_text(location: &ResolvedLocation) -> String {
    format!("{}: {:.4}, {:.4}", location.city_name, location.latitude, location.longitude)
}

pub fn presets_text() -> String {
    PresetLocation::all()
        .iter()
        .map(|p| {
            let (lat, lon) = p.coordinates();
            format!("{:<10} {} ({lat:.4}, {lon:.4})", p.as_str(), p.city_name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
