//! Resolved runtime settings.
//!
//! [`Settings`] is built from the parsed [`Cli`]: the requested day or date
//! becomes an absolute UTC timestamp and the endpoints are checked to be
//! valid URLs before any request is made.

use crate::cli::Cli;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name} URL '{value}'")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Date {0} has no unambiguous local noon")]
    AmbiguousDate(NaiveDate),

    #[error("Day offset {0} is out of range")]
    DaysOutOfRange(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub location: String,
    pub target: DateTime<Utc>,
    pub api_key: String,
    pub forecast_url: String,
    pub search_url: String,
    pub daily_outlook: bool,
    pub json: bool,
}

impl Settings {
    pub fn from_cli(cli: Cli, now: DateTime<Utc>) -> Result<Self, ConfigError> {
        validate_url("forecast", &cli.forecast_url)?;
        validate_url("search", &cli.search_url)?;

        let target = match cli.date {
            Some(date) => local_noon(date)?,
            None => offset_from(now, cli.days)?,
        };

        Ok(Settings {
            location: cli.location,
            target,
            api_key: cli.api_key,
            forecast_url: cli.forecast_url,
            search_url: cli.search_url,
            daily_outlook: cli.daily_outlook,
            json: cli.json,
        })
    }
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
            source,
        })
}

fn local_noon(date: NaiveDate) -> Result<DateTime<Utc>, ConfigError> {
    date.and_hms_opt(12, 0, 0)
        .and_then(|noon| Local.from_local_datetime(&noon).single())
        .map(|local| local.with_timezone(&Utc))
        .ok_or(ConfigError::AmbiguousDate(date))
}

fn offset_from(now: DateTime<Utc>, days: f64) -> Result<DateTime<Utc>, ConfigError> {
    let seconds = (days * 86_400.0).round();
    if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
        return Err(ConfigError::DaysOutOfRange(days));
    }
    Duration::try_seconds(seconds as i64)
        .and_then(|d| now.checked_add_signed(d))
        .ok_or(ConfigError::DaysOutOfRange(days))
}
