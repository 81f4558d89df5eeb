//! # Weather Scrape
//!
//! Current conditions and a short outlook for a named location, taken from
//! one of two sources and normalized into a single [`models::WeatherRecord`]:
//!
//! - a JSON forecast API ([`sources::apixu`]) for dates 8 to 10 days out
//! - a search-engine weather widget ([`sources::google`]) for anything closer
//!
//! Dates further out are reported as unavailable without a request.
//!
//! ## Architecture
//!
//! 1. **Selection**: [`selector`] turns the requested date into a day offset
//!    and picks a source
//! 2. **Fetching**: one GET request with a 10 second timeout
//! 3. **Normalizing**: the source's parser fills a [`models::WeatherRecord`],
//!    deriving pictograms through [`emoji`]

pub mod cli;
pub mod config;
pub mod emoji;
pub mod error;
pub mod models;
pub mod selector;
pub mod sources;
pub mod utils;

pub use error::WeatherError;
pub use models::{SubForecast, WeatherRecord};
pub use selector::{Source, WeatherService};
