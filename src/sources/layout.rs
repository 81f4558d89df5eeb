//! Selector and position tables for the search-engine weather widget.
//!
//! The widget is scraped by position: each selector yields nodes whose
//! meaning depends only on their index. Every index lives in one of the
//! tables below so a layout change means editing a table here, not the
//! scraping code in [`super::google`].

/// Root element that must appear exactly once.
pub const CONTAINER: &str = "div#wob_wc";
/// Location, date and condition text.
pub const SUMMARY: &str = "div#wob_wc > span[role=heading] > *";
/// Icon, temperature and the conditions block.
pub const DETAILED: &str = "div#wob_wc > div#wob_d > div > *";
/// Temperature value inside the temperature node.
pub const TEMPERATURE: &str = "#wob_tm";
/// Precipitation, humidity and wind inside the conditions block.
pub const CONDITIONS: &str = "div > span:first-child";
/// Preferred wind unit inside the wind node.
pub const WIND_VALUE: &str = "span:first-child";
/// Flat run of outlook nodes: date, icon, temperatures, repeated.
pub const SUB: &str = "div#wob_wc .wob_df > *";
/// Icon element inside an outlook node.
pub const SUB_ICON: &str = "img";

/// Scheme prepended to protocol-relative icon URLs.
pub const IMAGE_SCHEME: &str = "https:";
/// Outlook summary used when the icon has no `alt` text.
pub const UNKNOWN_SUMMARY: &str = "<Unknown>";

/// High/low pair such as `2373°1864°`: Celsius then Fahrenheit, twice.
pub const HI_LO_PATTERN: &str = r"(?P<hi>\d{2})\d{2}°(?P<lo>\d{2})\d{2}°";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryField {
    Location,
    Date,
    Condition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Image,
    Temperature,
    Conditions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionField {
    Precipitation,
    Humidity,
    Wind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubField {
    Date,
    Summary,
    Temperatures,
}

pub const SUMMARY_FIELDS: [SummaryField; 3] = [
    SummaryField::Location,
    SummaryField::Date,
    SummaryField::Condition,
];

pub const DETAIL_FIELDS: [DetailField; 3] = [
    DetailField::Image,
    DetailField::Temperature,
    DetailField::Conditions,
];

pub const CONDITION_FIELDS: [ConditionField; 3] = [
    ConditionField::Precipitation,
    ConditionField::Humidity,
    ConditionField::Wind,
];

pub const SUB_FIELDS: [SubField; 3] = [SubField::Date, SubField::Summary, SubField::Temperatures];

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_selectors_parse() {
        for css in [
            CONTAINER,
            SUMMARY,
            DETAILED,
            TEMPERATURE,
            CONDITIONS,
            WIND_VALUE,
            SUB,
            SUB_ICON,
        ] {
            assert!(Selector::parse(css).is_ok(), "selector {css} should parse");
        }
    }

    #[test]
    fn test_hi_lo_pattern() {
        let re = regex::Regex::new(HI_LO_PATTERN).unwrap();
        let caps = re.captures("2373°1864°").unwrap();
        assert_eq!(&caps["hi"], "23");
        assert_eq!(&caps["lo"], "18");
    }
}
