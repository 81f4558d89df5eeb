//! Normalized weather data shared by every source.
//!
//! - [`WeatherRecord`]: the result of one query
//! - [`SubForecast`]: one day of the short-range outlook
//!
//! Field values are kept as the free text each source provides (units
//! embedded), so both pipelines can fill the same record without agreeing
//! on a numeric representation.

use serde::Serialize;
use std::fmt;

/// The normalized result of a single weather query.
///
/// Constructed empty, populated once by exactly one pipeline, then handed
/// to the caller. When `unavailable` is set no source was consulted and the
/// primary fields stay empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherRecord {
    /// Location name as reported by the source.
    pub location: String,
    /// Observation or report date; format depends on the source.
    pub date: String,
    /// Condition summary, e.g. "Partly cloudy".
    pub summary: String,
    /// Condition icon URL or path.
    pub image: String,
    /// Temperature with unit, e.g. "21.00°".
    pub temp: String,
    /// Wind speed with unit.
    pub wind: String,
    /// Precipitation with unit.
    pub precipitation: String,
    /// Humidity, often a percentage string.
    pub humidity: String,
    /// Pictogram derived from `summary`.
    pub emoji: String,
    /// The requested date is outside every source's coverage window.
    pub unavailable: bool,
    /// Short-range outlook in source order.
    pub sub: Vec<SubForecast>,
}

/// One entry of the short-range daily outlook.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SubForecast {
    pub date: String,
    pub summary: String,
    pub emoji: String,
    pub temp_hi: String,
    pub temp_lo: String,
}

impl WeatherRecord {
    /// An empty record flagged as outside every source's coverage.
    pub fn unavailable() -> Self {
        WeatherRecord {
            unavailable: true,
            ..Default::default()
        }
    }

    /// Names of primary fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("location", &self.location),
            ("date", &self.date),
            ("summary", &self.summary),
            ("temp", &self.temp),
            ("wind", &self.wind),
            ("precipitation", &self.precipitation),
            ("humidity", &self.humidity),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Display for WeatherRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unavailable {
            return writeln!(f, "Weather data is not available for the requested date.");
        }
        writeln!(f, "Weather in {} is: {}.", self.location, self.summary)?;
        writeln!(f, "{} {}", self.emoji, self.date)?;
        writeln!(
            f,
            "Temp: {}  Wind: {}  Precipitation: {}  Humidity: {}",
            self.temp, self.wind, self.precipitation, self.humidity
        )?;
        for sub in &self.sub {
            writeln!(f, "{sub}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SubForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {:<12} {} {} ({} / {})",
            self.date, self.emoji, self.summary, self.temp_hi, self.temp_lo
        )
    }
}
