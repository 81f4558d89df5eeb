//! Search-engine weather widget scraper.
//!
//! Requests `<search-url>?q=<location>%20weather&hl=en` with a desktop
//! user-agent and scrapes the weather widget out of the result page. The
//! widget markup is not a public contract and may change at any time; all
//! selectors and positional mappings live in [`super::layout`].

use super::layout::{self, ConditionField, DetailField, SubField, SummaryField};
use super::{WeatherSource, fetch_body};
use crate::emoji::pictogram;
use crate::error::WeatherError;
use crate::models::{SubForecast, WeatherRecord};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

static HI_LO: Lazy<Regex> =
    Lazy::new(|| Regex::new(layout::HI_LO_PATTERN).expect("hi/lo pattern is a valid regex"));

/// Weather widget on a search result page.
#[derive(Debug, Clone)]
pub struct GoogleWeather {
    client: Client,
    search_url: String,
}

impl GoogleWeather {
    pub fn new(client: Client, search_url: impl Into<String>) -> Self {
        Self {
            client,
            search_url: search_url.into(),
        }
    }

    pub fn query_url(&self, location: &str) -> String {
        format!(
            "{}?q={}%20weather&hl=en",
            self.search_url,
            urlencoding::encode(location)
        )
    }
}

impl WeatherSource for GoogleWeather {
    fn name(&self) -> &'static str {
        "scrape"
    }

    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, location: &str) -> Result<WeatherRecord, WeatherError> {
        let url = self.query_url(location);
        let body = fetch_body(&self.client, &url).await?;
        parse_document(&body)
    }
}

fn selector(css: &str) -> Result<Selector, WeatherError> {
    Selector::parse(css).map_err(|e| WeatherError::parse(format!("invalid selector {css}: {e}"), css))
}

fn text_of(node: &ElementRef) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// Normalize a search result page into a [`WeatherRecord`].
///
/// # Errors
///
/// [`WeatherError::Parse`] when the body is not UTF-8, when
/// [`layout::CONTAINER`] does not match exactly one element, when an outlook
/// temperature cannot be split into high and low, or when a primary field
/// is left empty.
#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn parse_document(body: &[u8]) -> Result<WeatherRecord, WeatherError> {
    let html = std::str::from_utf8(body).map_err(|e| {
        WeatherError::parse(
            format!("document is not valid UTF-8: {e}"),
            &String::from_utf8_lossy(body),
        )
    })?;
    let document = Html::parse_document(html);

    let containers = document.select(&selector(layout::CONTAINER)?).count();
    if containers != 1 {
        return Err(WeatherError::parse(
            format!(
                "container {} matched {} elements, expected exactly 1",
                layout::CONTAINER,
                containers
            ),
            html,
        ));
    }

    let mut record = WeatherRecord::default();
    scrape_summary(&document, &mut record)?;
    scrape_details(&document, &mut record)?;
    record.sub = scrape_sub(&document)?;

    let missing = record.missing_fields();
    if !missing.is_empty() {
        return Err(WeatherError::parse(
            format!("weather widget is missing fields: {}", missing.join(", ")),
            html,
        ));
    }

    info!(
        location = %record.location,
        summary = %record.summary,
        sub_count = record.sub.len(),
        "Parsed weather widget"
    );
    Ok(record)
}

fn scrape_summary(document: &Html, record: &mut WeatherRecord) -> Result<(), WeatherError> {
    let summary = selector(layout::SUMMARY)?;
    for (node, field) in document.select(&summary).zip(layout::SUMMARY_FIELDS) {
        let val = text_of(&node);
        match field {
            SummaryField::Location => record.location = val,
            SummaryField::Date => record.date = val,
            SummaryField::Condition => {
                record.emoji = pictogram(&val);
                record.summary = val;
            }
        }
    }
    Ok(())
}

fn scrape_details(document: &Html, record: &mut WeatherRecord) -> Result<(), WeatherError> {
    let detailed = selector(layout::DETAILED)?;
    let temperature = selector(layout::TEMPERATURE)?;
    let conditions = selector(layout::CONDITIONS)?;
    let wind_value = selector(layout::WIND_VALUE)?;

    for (node, field) in document.select(&detailed).zip(layout::DETAIL_FIELDS) {
        match field {
            DetailField::Image => {
                let src = node.value().attr("src").map(str::trim).unwrap_or_default();
                if !src.is_empty() {
                    record.image = format!("{}{}", layout::IMAGE_SCHEME, src);
                }
            }
            DetailField::Temperature => {
                let val = node
                    .select(&temperature)
                    .next()
                    .map(|t| text_of(&t))
                    .unwrap_or_else(|| text_of(&node));
                // an empty value stays empty so the completeness check rejects it
                if !val.is_empty() {
                    record.temp = format!("{val}°C");
                }
            }
            DetailField::Conditions => {
                for (span, field) in node.select(&conditions).zip(layout::CONDITION_FIELDS) {
                    match field {
                        ConditionField::Precipitation => record.precipitation = text_of(&span),
                        ConditionField::Humidity => record.humidity = text_of(&span),
                        ConditionField::Wind => {
                            record.wind = span
                                .select(&wind_value)
                                .next()
                                .map(|w| text_of(&w))
                                .unwrap_or_else(|| text_of(&span));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Outlook nodes come as a flat run of (date, icon, temperatures) triples.
/// A run whose length is not a multiple of three is dropped entirely.
fn scrape_sub(document: &Html) -> Result<Vec<SubForecast>, WeatherError> {
    let sub = selector(layout::SUB)?;
    let icon = selector(layout::SUB_ICON)?;

    let nodes: Vec<ElementRef> = document.select(&sub).collect();
    let width = layout::SUB_FIELDS.len();
    if nodes.len() % width != 0 {
        warn!(
            count = nodes.len(),
            "Outlook node count is not a multiple of {width}; skipping outlook"
        );
        return Ok(Vec::new());
    }

    let mut subs = Vec::with_capacity(nodes.len() / width);
    for group in &nodes.into_iter().chunks(width) {
        let mut entry = SubForecast::default();
        for (node, field) in group.zip(layout::SUB_FIELDS) {
            match field {
                SubField::Date => entry.date = text_of(&node),
                SubField::Summary => {
                    let alt = node
                        .select(&icon)
                        .next()
                        .and_then(|img| img.value().attr("alt"))
                        .map(str::trim)
                        .filter(|alt| !alt.is_empty())
                        .unwrap_or(layout::UNKNOWN_SUMMARY)
                        .to_string();
                    entry.emoji = pictogram(&alt);
                    entry.summary = alt;
                }
                SubField::Temperatures => {
                    let (hi, lo) = split_hi_lo(&text_of(&node))?;
                    entry.temp_hi = hi;
                    entry.temp_lo = lo;
                }
            }
        }
        debug!(date = %entry.date, summary = %entry.summary, "Parsed outlook entry");
        subs.push(entry);
    }
    Ok(subs)
}

/// Split text like `2373°1864°` into `("23°", "18°")`.
pub fn split_hi_lo(text: &str) -> Result<(String, String), WeatherError> {
    let caps = HI_LO.captures(text).ok_or_else(|| {
        WeatherError::parse(
            format!("outlook temperatures {text:?} do not match {}", layout::HI_LO_PATTERN),
            text,
        )
    })?;
    Ok((format!("{}°", &caps["hi"]), format!("{}°", &caps["lo"])))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/google_weather.html");

    fn parse(html: &str) -> Result<WeatherRecord, WeatherError> {
        parse_document(html.as_bytes())
    }

    #[test]
    fn test_parse_fixture() {
        let record = parse(FIXTURE).unwrap();
        assert_eq!(record.location, "Yokohama, Kanagawa, Japan");
        assert_eq!(record.date, "Monday 14:00");
        assert_eq!(record.summary, "Partly cloudy");
        assert_eq!(record.emoji, "☁️");
        assert_eq!(
            record.image,
            "https://ssl.gstatic.com/onebox/weather/64/partly_cloudy.png"
        );
        assert_eq!(record.temp, "21°C");
        assert_eq!(record.precipitation, "10%");
        assert_eq!(record.humidity, "65%");
        assert_eq!(record.wind, "11 km/h");
        assert!(!record.unavailable);
    }

    #[test]
    fn test_parse_fixture_outlook() {
        let record = parse(FIXTURE).unwrap();
        assert_eq!(
            record.sub,
            vec![
                SubForecast {
                    date: "Tue".to_string(),
                    summary: "Rain".to_string(),
                    emoji: "☔️".to_string(),
                    temp_hi: "23°".to_string(),
                    temp_lo: "18°".to_string(),
                },
                SubForecast {
                    date: "Wed".to_string(),
                    summary: "Mostly sunny".to_string(),
                    emoji: "☀️".to_string(),
                    temp_hi: "21°".to_string(),
                    temp_lo: "15°".to_string(),
                },
                SubForecast {
                    date: "Thu".to_string(),
                    summary: "<Unknown>".to_string(),
                    emoji: "<<emoji_here>>".to_string(),
                    temp_hi: "19°".to_string(),
                    temp_lo: "14°".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_outlook_skipped_when_not_multiple_of_three() {
        // nine nodes become ten
        let html = FIXTURE.replacen(
            r#"<div class="wob_df">"#,
            r#"<div class="wob_df"><div>extra</div>"#,
            1,
        );
        let record = parse(&html).unwrap();
        assert!(record.sub.is_empty());
        assert_eq!(record.location, "Yokohama, Kanagawa, Japan");
    }

    #[test]
    fn test_duplicate_container_is_parse_error() {
        let html = FIXTURE.replace("</body>", r#"<div id="wob_wc"></div></body>"#);
        let err = parse(&html).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains(layout::CONTAINER));
        assert!(err.to_string().contains("matched 2"));
    }

    #[test]
    fn test_missing_container_is_parse_error() {
        let html = FIXTURE.replace(r#"id="wob_wc""#, r#"id="elsewhere""#);
        let err = parse(&html).unwrap_err();
        assert!(err.to_string().contains("matched 0"));
    }

    #[test]
    fn test_unmatched_outlook_temperatures_is_parse_error() {
        let html = FIXTURE.replace("<span>23</span><span>73</span>", "warm");
        let err = parse(&html).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("outlook temperatures"));
    }

    #[test]
    fn test_missing_summary_is_parse_error() {
        let html = FIXTURE.replace(r#"role="heading""#, r#"role="banner""#);
        let err = parse(&html).unwrap_err();
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn test_empty_temperature_is_parse_error() {
        let html = FIXTURE.replace(r#"<span id="wob_tm"> 21 </span>"#, r#"<span id="wob_tm">  </span>"#);
        let err = parse(&html).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("temp"));
    }

    #[test]
    fn test_blank_icon_attributes() {
        let html = FIXTURE
            .replace(
                r#"src="//ssl.gstatic.com/onebox/weather/64/partly_cloudy.png""#,
                r#"src="  ""#,
            )
            .replace(r#"alt="Rain""#, r#"alt="   ""#);
        let record = parse(&html).unwrap();
        assert_eq!(record.image, "");
        assert_eq!(record.sub[0].summary, "<Unknown>");
        assert_eq!(record.sub[0].emoji, "<<emoji_here>>");
    }

    #[test]
    fn test_non_utf8_body_is_parse_error() {
        let err = parse_document(b"\xff\xfe<html></html>").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_split_hi_lo() {
        assert_eq!(
            split_hi_lo("2373°1864°").unwrap(),
            ("23°".to_string(), "18°".to_string())
        );
        assert!(split_hi_lo("23°18°").is_err());
    }

    #[test]
    fn test_query_url_encodes_location() {
        let client = Client::new();
        let source = GoogleWeather::new(client, DEFAULT_SEARCH_URL);
        assert_eq!(
            source.query_url("New York"),
            "https://www.google.com/search?q=New%20York%20weather&hl=en"
        );
    }
}
