use log::debug;

use crate::error::ActivityError;
use crate::fetch::{Fetcher, Request};
use crate::model::WeatherRecord;
use crate::openweather;

/// How many days of forecast to request.
pub const FORECAST_DAYS: u8 = 7;

/// Fetches the daily forecast for the selected place and installs it on
/// that record. The record itself is owned by the search side; it is passed
/// in explicitly so the mutation site stays visible at the call site.
#[derive(Debug)]
pub struct ForecastController {
    days: u8,
}

impl Default for ForecastController {
    fn default() -> Self {
        Self { days: FORECAST_DAYS }
    }
}

impl ForecastController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected record's forecast sequence with freshly fetched
    /// entries.
    ///
    /// Fails with [`ActivityError::NoSelection`] when nothing is selected.
    /// The sequence is only replaced once the whole payload has parsed; on
    /// any failure the previous entries survive.
    pub async fn fetch_daily(
        &self,
        fetcher: &dyn Fetcher,
        selected: Option<&mut WeatherRecord>,
    ) -> Result<(), ActivityError> {
        let record = selected.ok_or(ActivityError::NoSelection)?;

        debug!("fetching {}-day forecast for place {}", self.days, record.id);
        let request = Request::DailyForecast { place: record.id, days: self.days };
        let body = fetcher.fetch(&request).await?;
        let entries = openweather::parse_daily(&body)?;

        record.daily_forecast = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::mock::FixtureFetcher;
    use crate::fixtures::{DAILY_LONDON, SEARCH_LONDON};
    use crate::openweather::parse_search;

    fn london() -> WeatherRecord {
        parse_search(SEARCH_LONDON.as_bytes()).unwrap().remove(0)
    }

    fn daily_request() -> Request {
        Request::DailyForecast { place: 2643743, days: FORECAST_DAYS }
    }

    #[tokio::test]
    async fn no_selection_is_an_error() {
        let fetcher = FixtureFetcher::new();
        let controller = ForecastController::new();

        let err = controller.fetch_daily(&fetcher, None).await.unwrap_err();
        assert!(matches!(err, ActivityError::NoSelection));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn success_replaces_the_forecast_sequence() {
        let fetcher = FixtureFetcher::new().on(&daily_request(), DAILY_LONDON);
        let controller = ForecastController::new();
        let mut record = london();

        controller.fetch_daily(&fetcher, Some(&mut record)).await.unwrap();
        assert_eq!(record.daily_forecast.len(), 7);
        assert!(record.daily_forecast.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[tokio::test]
    async fn failure_keeps_the_previous_entries() {
        let fetcher = FixtureFetcher::new().on(&daily_request(), DAILY_LONDON);
        let controller = ForecastController::new();
        let mut record = london();

        controller.fetch_daily(&fetcher, Some(&mut record)).await.unwrap();
        let before = record.daily_forecast.clone();

        let empty = FixtureFetcher::new();
        let err = controller.fetch_daily(&empty, Some(&mut record)).await.unwrap_err();
        assert!(matches!(err, ActivityError::EmptyResponse));
        assert_eq!(record.daily_forecast, before);
    }
}
