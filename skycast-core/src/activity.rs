use log::warn;

use crate::error::ActivityError;
use crate::fetch::Fetcher;
use crate::forecast::ForecastController;
use crate::model::{ForecastEntry, PlaceId, WeatherRecord};
use crate::search::SearchController;
use crate::units::{ScaleKind, Scales, TempScale};

/// Which view is active and which navigation actions are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Searching; the candidate list is showing (possibly empty).
    #[default]
    Search,
    /// A city is selected; its forecast has not been fetched yet.
    Forecasting,
    /// The selected city's forecast is showing.
    ForecastDisplayed,
}

/// The whole browsing session: search state, forecast state, display units
/// and the screen the user is looking at.
///
/// All operations run on one logical thread. The async operations take
/// `&mut self`, so a second fetch cannot be issued while one is
/// outstanding, and the shared selected record is only ever mutated after
/// an awaited download has completed. Every operation is atomic: on error
/// the screen and all lists keep their previous state.
#[derive(Debug)]
pub struct Activity {
    fetcher: Box<dyn Fetcher>,
    scales: Scales,
    screen: Screen,
    search: SearchController,
    forecast: ForecastController,
}

impl Activity {
    pub fn new(fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            scales: Scales::default(),
            screen: Screen::default(),
            search: SearchController::new(),
            forecast: ForecastController::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// The current candidate list, in API order.
    pub fn results(&self) -> &[WeatherRecord] {
        self.search.candidates()
    }

    pub fn selected(&self) -> Option<&WeatherRecord> {
        self.search.selected()
    }

    /// The selected city's forecast; empty when none has been fetched.
    pub fn daily_forecast(&self) -> &[ForecastEntry] {
        self.search.selected().map(|record| record.daily_forecast.as_slice()).unwrap_or(&[])
    }

    /// The forecast action is available once a city is selected and its
    /// forecast is not already showing.
    pub fn forecast_enabled(&self) -> bool {
        self.screen == Screen::Forecasting
    }

    /// Back is available only from the forecast view.
    pub fn back_enabled(&self) -> bool {
        self.screen == Screen::ForecastDisplayed
    }

    /// Search for cities by name. On success the candidate list is
    /// replaced, the selection cleared and the search view shown. An empty
    /// query does nothing at all.
    pub async fn search(&mut self, query: &str) -> Result<(), ActivityError> {
        let performed = self
            .search
            .search(self.fetcher.as_ref(), query)
            .await
            .inspect_err(|err| warn!("search failed: {err}"))?;
        if performed {
            self.screen = Screen::Search;
        }
        Ok(())
    }

    /// Select one of the current candidates, enabling the forecast action.
    pub fn select(&mut self, id: PlaceId) -> Result<(), ActivityError> {
        self.search.select(id)?;
        self.screen = Screen::Forecasting;
        Ok(())
    }

    /// Fetch the 7-day forecast for the selected city and show it.
    pub async fn fetch_forecast(&mut self) -> Result<(), ActivityError> {
        self.forecast
            .fetch_daily(self.fetcher.as_ref(), self.search.selected_mut())
            .await
            .inspect_err(|err| warn!("forecast fetch failed: {err}"))?;
        self.screen = Screen::ForecastDisplayed;
        Ok(())
    }

    /// Return from the forecast view to the search view, dropping the
    /// selection. A no-op anywhere else, matching the disabled back action.
    pub fn back(&mut self) {
        if self.screen == Screen::ForecastDisplayed {
            self.search.clear_selection();
            self.screen = Screen::Search;
        }
    }

    /// Re-run the fetch behind whatever is currently showing.
    pub async fn refresh(&mut self) -> Result<(), ActivityError> {
        match self.screen {
            Screen::Search | Screen::Forecasting => {
                let query = self.search.query().to_owned();
                let performed = self.search.search(self.fetcher.as_ref(), &query).await?;
                if performed {
                    self.screen = Screen::Search;
                }
                Ok(())
            }
            Screen::ForecastDisplayed => self.fetch_forecast().await,
        }
    }

    /// Change a display unit. Purely presentational: nothing is refetched,
    /// already-fetched readings are just rendered on the new scale.
    pub fn set_scale(&mut self, kind: ScaleKind, value: &str) -> anyhow::Result<()> {
        self.scales.set(kind, value)
    }

    pub fn set_temp_scale(&mut self, scale: TempScale) {
        self.scales.temp = scale;
    }
}
