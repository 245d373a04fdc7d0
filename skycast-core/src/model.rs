use chrono::{DateTime, Utc};

/// Integer key assigned by the weather API to a named location.
pub type PlaceId = i64;

/// Snapshot of current conditions for one place, as returned by a name
/// search. Immutable after parsing, except for `daily_forecast`, which is
/// empty until a forecast fetch replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub id: PlaceId,
    pub name: String,
    pub country: String,
    pub observed_at: DateTime<Utc>,
    /// Canonical storage unit for all temperatures is Kelvin.
    pub temp_k: f64,
    pub temp_min_k: f64,
    pub temp_max_k: f64,
    pub pressure_hpa: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub clouds_pct: Option<f64>,
    pub wind_mps: Option<f64>,
    pub condition_code: u16,
    pub condition: &'static str,
    pub icon: Option<String>,
    pub daily_forecast: Vec<ForecastEntry>,
}

impl WeatherRecord {
    /// "Name, CC" label used by every view.
    pub fn place_label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// One day of a place's forecast. Owned exclusively by the
/// `daily_forecast` of a single [`WeatherRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub date: DateTime<Utc>,
    pub temp_day_k: f64,
    pub temp_night_k: f64,
    pub pressure_hpa: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub clouds_pct: Option<f64>,
    pub wind_mps: Option<f64>,
    pub condition_code: u16,
    pub condition: &'static str,
    pub icon: Option<String>,
}
