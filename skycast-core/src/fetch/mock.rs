//! Canned fetcher for tests: requests resolve to fixed payloads, anything
//! unmapped fails like an empty download.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{FetchError, Fetcher, Request};

/// Clones share the call counter, so a test can hand one clone to an
/// [`crate::activity::Activity`] and keep another as a probe.
#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    responses: HashMap<String, Vec<u8>>,
    calls: Arc<AtomicUsize>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(mut self, request: &Request, body: &str) -> Self {
        self.responses.insert(request.path(), body.as_bytes().to_vec());
        self
    }

    /// How many fetches were issued, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, request: &Request) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.responses.get(&request.path()).cloned().ok_or(FetchError::Empty)
    }
}
