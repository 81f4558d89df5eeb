//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags; the API key and
//! endpoints can also come from environment variables.

use crate::sources::apixu::DEFAULT_FORECAST_URL;
use crate::sources::google::DEFAULT_SEARCH_URL;
use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for the weather lookup.
///
/// # Examples
///
/// ```sh
/// # Current conditions
/// weather_scrape Yokohama
///
/// # Nine days out, served by the forecast API
/// WEATHER_API_KEY=... weather_scrape Yokohama --days 9
///
/// # A specific date, printed as JSON
/// weather_scrape "New York" --date 2019-01-20 --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Location to look up
    pub location: String,

    /// Offset in days from now
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true, conflicts_with = "date")]
    pub days: f64,

    /// Calendar date to look up (YYYY-MM-DD, local noon)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Forecast API key
    #[arg(long, env = "WEATHER_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Forecast API endpoint
    #[arg(long, env = "WEATHER_FORECAST_URL", default_value = DEFAULT_FORECAST_URL)]
    pub forecast_url: String,

    /// Search page used for the weather widget
    #[arg(long, env = "WEATHER_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    /// Include the per-day forecast from the forecast API in the output
    #[arg(long)]
    pub daily_outlook: bool,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}
