//! Command-line entry point.
//!
//! ```sh
//! weather_scrape Yokohama --days 2
//! ```

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use weather_scrape::cli::Cli;
use weather_scrape::config::Settings;
use weather_scrape::sources::apixu::ApixuForecast;
use weather_scrape::sources::build_client;
use weather_scrape::sources::google::GoogleWeather;
use weather_scrape::WeatherService;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.location, ?args.days, ?args.date, "Parsed CLI arguments");

    let settings = Settings::from_cli(args, Utc::now())?;
    info!(location = %settings.location, target = %settings.target, "Looking up weather");

    let client = build_client()?;
    let forecast = ApixuForecast::new(client.clone(), &settings.forecast_url, &settings.api_key)
        .with_daily_outlook(settings.daily_outlook);
    let scrape = GoogleWeather::new(client, &settings.search_url);
    let service = WeatherService::new(forecast, scrape);

    let record = match service.get(&settings.location, settings.target).await {
        Ok(record) => record,
        Err(e) => {
            error!(location = %settings.location, error = %e, "Weather lookup failed");
            return Err(e.into());
        }
    };

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{record}");
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, unavailable = record.unavailable, "Execution complete");
    Ok(())
}
