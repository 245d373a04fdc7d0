use log::debug;

use crate::error::ActivityError;
use crate::fetch::{Fetcher, Request};
use crate::model::{PlaceId, WeatherRecord};
use crate::openweather;

/// Owns the "search by name" flow: the current query, the ordered candidate
/// list (API order preserved) and the selection within it.
#[derive(Debug, Default)]
pub struct SearchController {
    query: String,
    candidates: Vec<WeatherRecord>,
    selected: Option<usize>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[WeatherRecord] {
        &self.candidates
    }

    pub fn selected(&self) -> Option<&WeatherRecord> {
        self.selected.map(|index| &self.candidates[index])
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut WeatherRecord> {
        self.selected.map(|index| &mut self.candidates[index])
    }

    /// Run a name search and replace the candidate list with the parsed
    /// results, clearing any previous selection.
    ///
    /// An empty query is a no-op, not an error: nothing is fetched and
    /// `false` is returned. On failure the previous candidates, query and
    /// selection are all left untouched.
    pub async fn search(
        &mut self,
        fetcher: &dyn Fetcher,
        query: &str,
    ) -> Result<bool, ActivityError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(false);
        }

        debug!("searching: {query}");
        let request = Request::Find { query: query.to_owned() };
        let body = fetcher.fetch(&request).await?;
        let candidates = openweather::parse_search(&body)?;

        self.query = query.to_owned();
        self.candidates = candidates;
        self.selected = None;
        Ok(true)
    }

    /// Select a candidate by place id. The id must name a member of the
    /// current candidate list; otherwise the selection is left unchanged
    /// and [`ActivityError::NotFound`] is returned.
    pub fn select(&mut self, id: PlaceId) -> Result<(), ActivityError> {
        let index = self
            .candidates
            .iter()
            .position(|candidate| candidate.id == id)
            .ok_or(ActivityError::NotFound)?;
        self.selected = Some(index);
        Ok(())
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Request;
    use crate::fetch::mock::FixtureFetcher;
    use crate::fixtures::SEARCH_LONDON;

    fn find(query: &str) -> Request {
        Request::Find { query: query.to_string() }
    }

    #[tokio::test]
    async fn search_replaces_candidates_and_clears_selection() {
        let fetcher = FixtureFetcher::new().on(&find("London"), SEARCH_LONDON);
        let mut controller = SearchController::new();

        assert!(controller.search(&fetcher, "London").await.unwrap());
        assert_eq!(controller.candidates().len(), 3);
        assert_eq!(controller.query(), "London");

        controller.select(2643743).unwrap();
        assert!(controller.selected().is_some());

        assert!(controller.search(&fetcher, "London").await.unwrap());
        assert!(controller.selected().is_none(), "a new search must clear the selection");
    }

    #[tokio::test]
    async fn empty_query_is_a_noop() {
        let fetcher = FixtureFetcher::new();
        let mut controller = SearchController::new();

        assert!(!controller.search(&fetcher, "").await.unwrap());
        assert!(!controller.search(&fetcher, "   ").await.unwrap());
        assert_eq!(fetcher.calls(), 0, "an empty query must not fetch");
    }

    #[tokio::test]
    async fn failed_search_keeps_the_previous_candidates() {
        let fetcher = FixtureFetcher::new().on(&find("London"), SEARCH_LONDON);
        let mut controller = SearchController::new();

        controller.search(&fetcher, "London").await.unwrap();
        controller.select(6058560).unwrap();

        let err = controller.search(&fetcher, "Atlantis").await.unwrap_err();
        assert!(matches!(err, ActivityError::EmptyResponse));
        assert_eq!(controller.candidates().len(), 3);
        assert_eq!(controller.query(), "London");
        assert_eq!(controller.selected().map(|record| record.id), Some(6058560));
    }

    #[tokio::test]
    async fn selecting_an_unknown_id_fails_not_found() {
        let fetcher = FixtureFetcher::new().on(&find("London"), SEARCH_LONDON);
        let mut controller = SearchController::new();
        controller.search(&fetcher, "London").await.unwrap();

        controller.select(2643743).unwrap();
        let err = controller.select(1).unwrap_err();
        assert!(matches!(err, ActivityError::NotFound));
        assert_eq!(
            controller.selected().map(|record| record.id),
            Some(2643743),
            "a failed select must leave the selection unchanged"
        );
    }
}
