//! Error kinds produced by a weather query.
//!
//! A query fails in one of two ways: the transport gave up ([`WeatherError::Network`])
//! or the payload did not have the shape the normalizers expect
//! ([`WeatherError::Parse`]). Both are terminal for the query. A date outside
//! every source's coverage is not an error; see [`crate::models::WeatherRecord::unavailable`].

use crate::utils::{redact_url, truncate_for_log};
use thiserror::Error;

/// Maximum number of payload bytes carried in a [`WeatherError::Parse`] excerpt.
pub const EXCERPT_LEN: usize = 300;

#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection failure, timeout, or a non-2xx response.
    #[error("NetworkError: request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Malformed JSON, unexpected HTML structure, or a field that could not be extracted.
    #[error("ParseError: {context}")]
    Parse { context: String, excerpt: String },
}

impl WeatherError {
    /// Build a network error. The API key is redacted from `url` and the
    /// transport error is stripped of its own copy of the URL.
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        WeatherError::Network {
            url: redact_url(url),
            source: source.without_url(),
        }
    }

    /// Build a parse error, keeping a bounded excerpt of the offending payload.
    pub fn parse(context: impl Into<String>, payload: &str) -> Self {
        WeatherError::Parse {
            context: context.into(),
            excerpt: truncate_for_log(payload, EXCERPT_LEN),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, WeatherError::Parse { .. })
    }
}
