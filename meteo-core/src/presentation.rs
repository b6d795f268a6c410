//! Weather-code to screen theme mapping.
//!
//! Codes follow the WMO present-weather classification used by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// An RGBA color, alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherTheme {
    ClearSky,
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    /// Fallback for codes outside every known range.
    Unknown,
}

impl WeatherTheme {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherTheme::ClearSky => "Clear sky",
            WeatherTheme::PartlyCloudy => "Partly cloudy",
            WeatherTheme::Fog => "Fog",
            WeatherTheme::Drizzle => "Drizzle",
            WeatherTheme::Rain => "Rain",
            WeatherTheme::Snow => "Snow",
            WeatherTheme::Thunderstorm => "Thunderstorm",
            WeatherTheme::Unknown => "Unknown",
        }
    }

    /// Gradient stops, bottom to top.
    pub fn gradient(&self) -> [Rgba; 3] {
        match self {
            WeatherTheme::ClearSky => [
                Rgba::opaque(0, 119, 255),
                Rgba::opaque(41, 163, 255),
                Rgba::opaque(135, 206, 250),
            ],
            WeatherTheme::PartlyCloudy => [
                Rgba::opaque(96, 125, 150),
                Rgba::opaque(143, 170, 196),
                Rgba::opaque(200, 214, 229),
            ],
            WeatherTheme::Fog => [
                Rgba::opaque(97, 97, 97),
                Rgba::opaque(158, 158, 158),
                Rgba::opaque(205, 205, 205),
            ],
            WeatherTheme::Drizzle => [
                Rgba::opaque(38, 50, 66),
                Rgba::opaque(66, 86, 110),
                Rgba::opaque(110, 130, 156),
            ],
            WeatherTheme::Rain => [
                Rgba::opaque(40, 44, 52),
                Rgba::opaque(74, 80, 92),
                Rgba::opaque(112, 120, 133),
            ],
            WeatherTheme::Snow => [
                Rgba::opaque(164, 196, 222),
                Rgba::opaque(205, 226, 242),
                Rgba::opaque(245, 250, 255),
            ],
            WeatherTheme::Thunderstorm => [
                Rgba::opaque(8, 8, 12),
                Rgba::opaque(28, 28, 40),
                Rgba::opaque(58, 56, 78),
            ],
            WeatherTheme::Unknown => [
                Rgba::opaque(2, 0, 36),
                Rgba::opaque(9, 9, 121),
                Rgba::opaque(0, 212, 255),
            ],
        }
    }

    pub fn animation(&self) -> AnimationAsset {
        match self {
            WeatherTheme::ClearSky => AnimationAsset::Sunny,
            WeatherTheme::PartlyCloudy => AnimationAsset::PartlyCloudy,
            WeatherTheme::Fog => AnimationAsset::Foggy,
            WeatherTheme::Drizzle => AnimationAsset::Drizzle,
            WeatherTheme::Rain => AnimationAsset::Rain,
            WeatherTheme::Snow => AnimationAsset::Snow,
            WeatherTheme::Thunderstorm => AnimationAsset::Thunderstorm,
            WeatherTheme::Unknown => AnimationAsset::Night,
        }
    }
}

impl std::fmt::Display for WeatherTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier of a decorative animation shipped with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationAsset {
    Sunny,
    PartlyCloudy,
    Foggy,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Night,
}

impl AnimationAsset {
    pub fn id(&self) -> &'static str {
        match self {
            AnimationAsset::Sunny => "sunny",
            AnimationAsset::PartlyCloudy => "partly_cloudy",
            AnimationAsset::Foggy => "foggy",
            AnimationAsset::Drizzle => "drizzle",
            AnimationAsset::Rain => "rain",
            AnimationAsset::Snow => "snow",
            AnimationAsset::Thunderstorm => "thunderstorm",
            AnimationAsset::Night => "night",
        }
    }
}

impl std::fmt::Display for AnimationAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentationBundle {
    pub theme: WeatherTheme,
    pub gradient: [Rgba; 3],
    pub animation: AnimationAsset,
}

/// Ordered, non-overlapping code ranges. Evaluated top to bottom, first match wins.
const CODE_TABLE: &[(RangeInclusive<i32>, WeatherTheme)] = &[
    (0..=0, WeatherTheme::ClearSky),
    (1..=3, WeatherTheme::PartlyCloudy),
    (45..=45, WeatherTheme::Fog),
    (48..=48, WeatherTheme::Fog),
    (51..=55, WeatherTheme::Drizzle),
    (61..=65, WeatherTheme::Rain),
    (71..=75, WeatherTheme::Snow),
    (76..=i32::MAX, WeatherTheme::Thunderstorm),
];

pub fn theme_for_code(code: i32) -> WeatherTheme {
    CODE_TABLE
        .iter()
        .find(|(range, _)| range.contains(&code))
        .map(|(_, theme)| *theme)
        .unwrap_or(WeatherTheme::Unknown)
}

/// Maps any weather code to its presentation. Total: never fails.
pub fn present(code: i32) -> PresentationBundle {
    let theme = theme_for_code(code);
    PresentationBundle { theme, gradient: theme.gradient(), animation: theme.animation() }
}
