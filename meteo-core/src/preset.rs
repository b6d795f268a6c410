use crate::ResolvedLocation;

/// Fixed locations offered on the welcome screen. They skip geocoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetLocation {
    Randwick,
    Chennai,
}

impl PresetLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetLocation::Randwick => "randwick",
            PresetLocation::Chennai => "chennai",
        }
    }

    pub fn city_name(&self) -> &'static str {
        match self {
            PresetLocation::Randwick => "Randwick",
            PresetLocation::Chennai => "Chennai",
        }
    }

    /// (latitude, longitude)
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            PresetLocation::Randwick => (-33.907715, 151.235559),
            PresetLocation::Chennai => (13.0827, 80.2707),
        }
    }

    pub fn location(&self) -> ResolvedLocation {
        let (latitude, longitude) = self.coordinates();
        ResolvedLocation::new(self.city_name(), latitude, longitude)
    }

    pub const fn all() -> &'static [PresetLocation] {
        &[PresetLocation::Randwick, PresetLocation::Chennai]
    }
}

impl std::fmt::Display for PresetLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PresetLocation {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "randwick" => Ok(PresetLocation::Randwick),
            "chennai" => Ok(PresetLocation::Chennai),
            _ => Err(anyhow::anyhow!(
                "Unknown preset '{value}'. Supported presets: randwick, chennai."
            )),
        }
    }
}
