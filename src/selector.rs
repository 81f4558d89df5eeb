//! Source selection by requested date.
//!
//! The requested date is turned into a fractional day offset from now
//! (rounded to the nearest hour first), and the offset picks the source:
//!
//! | Offset | Source |
//! |--------|--------|
//! | `> 10` | none, the record is flagged unavailable |
//! | `> 8` and `<= 10` | JSON forecast API |
//! | `<= 8` | search-engine weather widget |
//!
//! Errors from the chosen source are returned unchanged; nothing is retried.

use crate::error::WeatherError;
use crate::models::WeatherRecord;
use crate::sources::WeatherSource;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument};

/// Offsets above this are outside both sources' coverage.
pub const FORECAST_HORIZON_DAYS: f64 = 10.0;
/// Offsets above this (up to the horizon) go to the forecast API.
pub const SCRAPE_HORIZON_DAYS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Historical range. No source is consulted.
    // TODO: route to the history endpoint once an account tier with
    // access to dates older than seven days is available.
    Historical,
    Forecast,
    Scrape,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Historical => "historical",
            Source::Forecast => "forecast",
            Source::Scrape => "scrape",
        }
    }
}

/// Days between `now` and `target`, rounded to the nearest hour.
pub fn day_offset(target: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let seconds = (target - now).num_seconds() as f64;
    let hours = (seconds / 3600.0).round();
    hours / 24.0
}

pub fn select_source(offset: f64) -> Source {
    if offset > FORECAST_HORIZON_DAYS {
        Source::Historical
    } else if offset > SCRAPE_HORIZON_DAYS {
        Source::Forecast
    } else {
        Source::Scrape
    }
}

/// Routes each query to one of two sources.
#[derive(Debug)]
pub struct WeatherService<F, S> {
    forecast: F,
    scrape: S,
}

impl<F, S> WeatherService<F, S>
where
    F: WeatherSource,
    S: WeatherSource,
{
    pub fn new(forecast: F, scrape: S) -> Self {
        Self { forecast, scrape }
    }

    /// Weather for `location` on `target`, measured from the current time.
    pub async fn get(
        &self,
        location: &str,
        target: DateTime<Utc>,
    ) -> Result<WeatherRecord, WeatherError> {
        self.get_at(location, target, Utc::now()).await
    }

    #[instrument(level = "info", skip(self, now))]
    pub async fn get_at(
        &self,
        location: &str,
        target: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<WeatherRecord, WeatherError> {
        let offset = day_offset(target, now);
        let source = select_source(offset);
        info!(offset, source = source.as_str(), "Selected weather source");

        match source {
            Source::Historical => Ok(WeatherRecord::unavailable()),
            Source::Forecast => dispatch(&self.forecast, location).await,
            Source::Scrape => dispatch(&self.scrape, location).await,
        }
    }
}

async fn dispatch<T: WeatherSource>(
    source: &T,
    location: &str,
) -> Result<WeatherRecord, WeatherError> {
    debug!(source = source.name(), %location, "Fetching weather");
    let result = source.fetch(location).await;
    if let Err(e) = &result {
        error!(source = source.name(), error = %e, "Weather source failed");
    }
    result
}
