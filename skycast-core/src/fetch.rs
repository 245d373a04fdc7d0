//! The download collaborator.
//!
//! The controllers never talk HTTP themselves; they hand a [`Request`] to a
//! [`Fetcher`] and parse whatever bytes come back. [`HttpFetcher`] is the
//! real implementation; tests substitute a canned one.

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::config::Config;
use crate::model::PlaceId;

pub mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpFetcher;

/// Construct the HTTP fetcher from config: configured or built-in API key.
pub fn fetcher_from_config(config: &Config) -> HttpFetcher {
    HttpFetcher::new(config.api_key().to_owned())
}

/// The two request shapes the weather API serves us.
///
/// Both are relative paths against the API base URL; the credential is
/// appended by the fetcher, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Search places by name.
    Find { query: String },
    /// Daily forecast for a known place.
    DailyForecast { place: PlaceId, days: u8 },
}

impl Request {
    pub fn path(&self) -> String {
        match self {
            Request::Find { query } => format!("find?q={query}&type=like&mode=json"),
            Request::DailyForecast { place, days } => {
                format!("forecast/daily?id={place}&mode=json&cnt={days}")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach the weather service")]
    Request(#[source] reqwest::Error),

    #[error("the weather service returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    /// Zero-length body, or an HTML error page where JSON was expected.
    #[error("the weather service returned an empty or non-JSON response")]
    Empty,
}

/// Asynchronous fetch primitive. A fetch always runs to completion; there
/// is no cancellation. Progress reporting, where an implementation offers
/// it, is purely advisory.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    async fn fetch(&self, request: &Request) -> Result<Vec<u8>, FetchError>;
}
