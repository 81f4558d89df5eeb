//! Condition text to pictogram mapping.
//!
//! The glyph table is built once on first use and never mutated. The
//! matching rules are priority-ordered substring checks; "clear with
//! thunderstorms" is sunny because the clear/sun rule wins before the
//! thunder rule is consulted.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Returned when no rule matches the condition text.
pub const PLACEHOLDER: &str = "<<emoji_here>>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pictogram {
    Sunny,
    CloudySunny,
    Rain,
    CloudyRain,
    Cloudy,
    Thunder,
    Snow,
}

pub type PictogramTable = HashMap<Pictogram, &'static str>;

/// Glyph for each [`Pictogram`].
pub static PICTOGRAMS: Lazy<PictogramTable> = Lazy::new(|| {
    HashMap::from([
        (Pictogram::Sunny, "☀️"),
        (Pictogram::CloudySunny, "⛅"),
        (Pictogram::Rain, "☔️"),
        (Pictogram::CloudyRain, "🌧️"),
        (Pictogram::Cloudy, "☁️"),
        (Pictogram::Thunder, "⚡"),
        (Pictogram::Snow, "❄️"),
    ])
});

/// Classify a condition description. Matching is case-insensitive.
pub fn classify(condition: &str) -> Option<Pictogram> {
    let condition = condition.to_lowercase();
    let cloudy = condition.contains("cloud");

    if condition.contains("clear") || condition.contains("sun") {
        Some(if cloudy {
            Pictogram::CloudySunny
        } else {
            Pictogram::Sunny
        })
    } else if condition.contains("rain") {
        Some(if cloudy {
            Pictogram::CloudyRain
        } else {
            Pictogram::Rain
        })
    } else if cloudy {
        Some(Pictogram::Cloudy)
    } else if condition.contains("thunder") {
        Some(Pictogram::Thunder)
    } else if condition.contains("snow") {
        Some(Pictogram::Snow)
    } else {
        None
    }
}

/// Look up the glyph for `condition` in `table`, or [`PLACEHOLDER`].
pub fn pictogram_from(table: &PictogramTable, condition: &str) -> String {
    classify(condition)
        .and_then(|p| table.get(&p).copied())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// Glyph for `condition` using the process-wide [`PICTOGRAMS`] table.
pub fn pictogram(condition: &str) -> String {
    pictogram_from(&PICTOGRAMS, condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sunny", "☀️")]
    #[case("Clear", "☀️")]
    #[case("Partly sunny", "☀️")]
    #[case("Mostly sunny with some clouds", "⛅")]
    #[case("light rain and cloudy", "🌧️")]
    #[case("Light rain", "☔️")]
    #[case("partly cloudy", "☁️")]
    #[case("Thunderstorm", "⚡")]
    #[case("Heavy SNOW", "❄️")]
    #[case("clear with thunderstorms", "☀️")]
    #[case("Mist", PLACEHOLDER)]
    #[case("", PLACEHOLDER)]
    fn test_pictogram(#[case] condition: &str, #[case] expected: &str) {
        assert_eq!(pictogram(condition), expected);
    }

    #[test]
    fn test_rule_precedence() {
        // rain beats cloud, sun beats rain, cloud beats thunder and snow
        assert_eq!(classify("cloudy with rain"), Some(Pictogram::CloudyRain));
        assert_eq!(classify("sun and rain"), Some(Pictogram::Sunny));
        assert_eq!(classify("cloudy, thunder"), Some(Pictogram::Cloudy));
        assert_eq!(classify("thunder snow"), Some(Pictogram::Thunder));
    }

    #[test]
    fn test_custom_table() {
        let table = PictogramTable::from([(Pictogram::Sunny, "SUN")]);
        assert_eq!(pictogram_from(&table, "Sunny"), "SUN");
        assert_eq!(pictogram_from(&table, "Snow"), PLACEHOLDER);
    }
}
