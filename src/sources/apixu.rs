//! Apixu JSON forecast client.
//!
//! Requests `<forecast-url>?key=<key>&q=<location>&days=10` and maps the
//! nested payload onto a [`WeatherRecord`]. The payload carries a per-day
//! forecast array; it is only copied into the record's outlook when the
//! daily outlook is enabled, otherwise the outlook stays empty.

use super::{WeatherSource, fetch_body};
use crate::emoji::pictogram;
use crate::error::WeatherError;
use crate::models::{SubForecast, WeatherRecord};
use crate::utils::looks_truncated;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

pub const DEFAULT_FORECAST_URL: &str = "https://api.apixu.com/v1/forecast.json";

/// Number of forecast days requested from the API.
pub const FORECAST_DAYS: u32 = 10;

/// Top-level forecast payload.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub location: Location,
    pub current: Current,
    #[serde(default)]
    pub forecast: Forecast,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime_epoch: i64,
    pub localtime: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Current {
    pub last_updated_epoch: i64,
    pub last_updated: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: i64,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_degree: i64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub precip_mm: f64,
    pub humidity: i64,
    pub cloud: i64,
    pub feelslike_c: f64,
    pub vis_km: f64,
    pub uv: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForecastDay {
    pub date: String,
    pub date_epoch: i64,
    pub day: Day,
    pub astro: Astro,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Day {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub avghumidity: f64,
    pub condition: Condition,
    pub uv: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
}

/// Forecast API source.
#[derive(Debug, Clone)]
pub struct ApixuForecast {
    client: Client,
    forecast_url: String,
    api_key: String,
    daily_outlook: bool,
}

impl ApixuForecast {
    pub fn new(client: Client, forecast_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            forecast_url: forecast_url.into(),
            api_key: api_key.into(),
            daily_outlook: false,
        }
    }

    /// Copy the per-day forecast array into the record's outlook.
    pub fn with_daily_outlook(mut self, enabled: bool) -> Self {
        self.daily_outlook = enabled;
        self
    }

    pub fn query_url(&self, location: &str) -> String {
        format!(
            "{}?key={}&q={}&days={}",
            self.forecast_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(location),
            FORECAST_DAYS
        )
    }
}

impl WeatherSource for ApixuForecast {
    fn name(&self) -> &'static str {
        "forecast"
    }

    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, location: &str) -> Result<WeatherRecord, WeatherError> {
        let url = self.query_url(location);
        let body = fetch_body(&self.client, &url).await?;
        parse_forecast(&body, self.daily_outlook)
    }
}

/// Normalize a forecast payload into a [`WeatherRecord`].
///
/// Temperature, wind and precipitation are rendered with two decimals and
/// their unit suffix; humidity is the bare integer.
#[instrument(level = "debug", skip(body), fields(bytes = body.len()))]
pub fn parse_forecast(body: &[u8], daily_outlook: bool) -> Result<WeatherRecord, WeatherError> {
    let payload: ForecastResponse = serde_json::from_slice(body).map_err(|e| {
        if looks_truncated(&e) {
            warn!(error = %e, "Forecast payload ended early");
        }
        WeatherError::parse(
            format!("unable to parse forecast json: {e}"),
            &String::from_utf8_lossy(body),
        )
    })?;

    let current = &payload.current;
    let mut record = WeatherRecord {
        location: payload.location.name.clone(),
        date: payload.location.localtime.clone(),
        summary: current.condition.text.clone(),
        image: current.condition.icon.clone(),
        temp: format!("{:.2}°", current.temp_c),
        wind: format!("{:.2}Kph", current.wind_kph),
        precipitation: format!("{:.2}mm", current.precip_mm),
        humidity: current.humidity.to_string(),
        emoji: pictogram(&current.condition.text),
        ..Default::default()
    };

    if daily_outlook {
        record.sub = payload
            .forecast
            .forecastday
            .iter()
            .map(|fd| SubForecast {
                date: fd.date.clone(),
                summary: fd.day.condition.text.clone(),
                emoji: pictogram(&fd.day.condition.text),
                temp_hi: format!("{:.2}°", fd.day.maxtemp_c),
                temp_lo: format!("{:.2}°", fd.day.mintemp_c),
            })
            .collect();
    }

    let missing = record.missing_fields();
    if !missing.is_empty() {
        return Err(WeatherError::parse(
            format!("forecast payload is missing fields: {}", missing.join(", ")),
            &String::from_utf8_lossy(body),
        ));
    }

    info!(
        location = %record.location,
        summary = %record.summary,
        forecast_days = payload.forecast.forecastday.len(),
        "Parsed forecast payload"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/apixu_forecast.json");

    #[test]
    fn test_parse_fixture_exact_record() {
        let record = parse_forecast(FIXTURE.as_bytes(), false).unwrap();
        assert_eq!(
            record,
            WeatherRecord {
                location: "Yokohama".to_string(),
                date: "2019-01-14 14:05".to_string(),
                summary: "Light rain and cloudy".to_string(),
                image: "//cdn.apixu.com/weather/64x64/day/296.png".to_string(),
                temp: "21.00°".to_string(),
                wind: "11.20Kph".to_string(),
                precipitation: "0.30mm".to_string(),
                humidity: "65".to_string(),
                emoji: "🌧️".to_string(),
                unavailable: false,
                sub: vec![],
            }
        );
    }

    #[test]
    fn test_daily_outlook_is_off_by_default() {
        let record = parse_forecast(FIXTURE.as_bytes(), false).unwrap();
        assert!(record.sub.is_empty());
    }

    #[test]
    fn test_daily_outlook_when_enabled() {
        let record = parse_forecast(FIXTURE.as_bytes(), true).unwrap();
        assert_eq!(
            record.sub,
            vec![
                SubForecast {
                    date: "2019-01-14".to_string(),
                    summary: "Patchy rain possible".to_string(),
                    emoji: "☔️".to_string(),
                    temp_hi: "22.40°".to_string(),
                    temp_lo: "15.10°".to_string(),
                },
                SubForecast {
                    date: "2019-01-15".to_string(),
                    summary: "Sunny".to_string(),
                    emoji: "☀️".to_string(),
                    temp_hi: "24.00°".to_string(),
                    temp_lo: "16.50°".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_truncated_json_is_parse_error() {
        let truncated = &FIXTURE[..FIXTURE.len() / 2];
        let err = parse_forecast(truncated.as_bytes(), false).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("unable to parse forecast json"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_forecast(b"{\"location\": [}", false).unwrap_err();
        match err {
            WeatherError::Parse { excerpt, .. } => assert_eq!(excerpt, "{\"location\": [}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_location_is_parse_error() {
        let body = br#"{"location": {}, "current": {"condition": {"text": "Sunny"}}}"#;
        let err = parse_forecast(body, false).unwrap_err();
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn test_query_url_encodes_key_and_location() {
        let source = ApixuForecast::new(Client::new(), DEFAULT_FORECAST_URL, "k&y");
        assert_eq!(
            source.query_url("São Paulo"),
            "https://api.apixu.com/v1/forecast.json?key=k%26y&q=S%C3%A3o%20Paulo&days=10"
        );
    }
}
