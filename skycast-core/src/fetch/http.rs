use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::sync::Arc;

use super::{FetchError, Fetcher, Request};

/// Base URL of the weather-data API.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

/// Advisory progress callback: `(bytes_so_far, content_length)`.
pub type ProgressFn = dyn Fn(u64, Option<u64>) + Send + Sync;

/// [`Fetcher`] backed by the public weather API over HTTP.
///
/// Appends the API credential to the request path; the request shapes
/// themselves already carry their query string.
#[derive(Clone)]
pub struct HttpFetcher {
    base_url: String,
    api_key: String,
    http: Client,
    progress: Option<Arc<ProgressFn>>,
}

impl HttpFetcher {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_owned(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self { base_url, api_key, http: Client::new(), progress: None }
    }

    /// Attach an advisory progress callback, invoked after every received
    /// chunk. Never affects the outcome of a fetch.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<ProgressFn>) -> Self {
        self.progress = Some(progress);
        self
    }

    fn request_url(&self, request: &Request) -> String {
        format!(
            "{}/{}&APPID={}",
            self.base_url.trim_end_matches('/'),
            request.path(),
            self.api_key
        )
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("base_url", &self.base_url)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request) -> Result<Vec<u8>, FetchError> {
        let url = self.request_url(request);
        debug!("GET {}", request.path());

        let mut res = self.http.get(&url).send().await.map_err(FetchError::Request)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!("request {} failed with status {status}", request.path());
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let html = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/html"));
        let total = res.content_length();

        let mut body = Vec::new();
        while let Some(chunk) = res.chunk().await.map_err(FetchError::Request)? {
            body.extend_from_slice(&chunk);
            if let Some(progress) = &self.progress {
                progress(body.len() as u64, total);
            }
        }

        // The API serves its error pages as HTML; treat those like an
        // empty download rather than handing them to the parsers.
        if body.is_empty() || html {
            warn!("request {} returned an empty or HTML body", request.path());
            return Err(FetchError::Empty);
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
