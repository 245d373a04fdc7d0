//! Mapping of the raw weather-API payloads onto the domain model.
//!
//! A payload either parses completely or the call fails; there are no
//! partial results. Required fields (place id, name, country, timestamp,
//! temperatures, condition code) fail the parse when missing. Optional
//! readings (pressure, humidity, clouds, wind) map a missing key to `None`
//! and must be finite, non-negative numbers when present.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::conditions;
use crate::error::ActivityError;
use crate::model::{ForecastEntry, PlaceId, WeatherRecord};

/// Response status carried inside the payload. The API reports it as a
/// string on some endpoints and a number on others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCod {
    Num(i64),
    Text(String),
}

impl OwCod {
    fn is_ok(&self) -> bool {
        match self {
            OwCod::Num(code) => *code == 200,
            OwCod::Text(code) => code == "200",
        }
    }

    fn code(&self) -> String {
        match self {
            OwCod::Num(code) => code.to_string(),
            OwCod::Text(code) => code.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwSearchResponse {
    cod: OwCod,
    list: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    id: PlaceId,
    name: String,
    dt: i64,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: Option<OwWind>,
    clouds: Option<OwClouds>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    id: u16,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    cod: OwCod,
    list: Option<Vec<OwForecastDay>>,
}

#[derive(Debug, Deserialize)]
struct OwForecastDay {
    dt: i64,
    temp: OwDayTemp,
    weather: Vec<OwCondition>,
    speed: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
    clouds: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwDayTemp {
    day: f64,
    night: f64,
}

/// Parse one element of a name-search result array into a
/// [`WeatherRecord`].
pub fn parse_current(raw: &Value) -> Result<WeatherRecord, ActivityError> {
    let city: OwCity =
        serde_json::from_value(raw.clone()).map_err(|err| malformed(err.to_string()))?;

    let cond = city.weather.first().ok_or_else(|| malformed("weather conditions are empty"))?;
    let condition =
        conditions::describe(cond.id).ok_or(ActivityError::UnknownConditionCode(cond.id))?;
    let observed_at = timestamp(city.dt)?;

    Ok(WeatherRecord {
        id: city.id,
        name: city.name,
        country: city.sys.country,
        observed_at,
        temp_k: city.main.temp,
        temp_min_k: city.main.temp_min,
        temp_max_k: city.main.temp_max,
        pressure_hpa: optional_reading("pressure", city.main.pressure)?,
        humidity_pct: optional_reading("humidity", city.main.humidity)?,
        clouds_pct: optional_reading("clouds", city.clouds.and_then(|c| c.all))?,
        wind_mps: optional_reading("wind speed", city.wind.and_then(|w| w.speed))?,
        condition_code: cond.id,
        condition,
        icon: cond.icon.clone(),
        daily_forecast: Vec::new(),
    })
}

/// Parse a whole name-search response into the ordered candidate list,
/// preserving API order.
pub fn parse_search(body: &[u8]) -> Result<Vec<WeatherRecord>, ActivityError> {
    let response: OwSearchResponse =
        serde_json::from_slice(body).map_err(|err| malformed(err.to_string()))?;

    if !response.cod.is_ok() {
        return Err(ActivityError::ServiceRejected(response.cod.code()));
    }

    let list = response.list.ok_or_else(|| malformed("search response has no result list"))?;
    list.iter().map(parse_current).collect()
}

/// Parse a daily-forecast response into entries ordered by ascending date.
pub fn parse_daily(body: &[u8]) -> Result<Vec<ForecastEntry>, ActivityError> {
    let response: OwForecastResponse =
        serde_json::from_slice(body).map_err(|err| malformed(err.to_string()))?;

    if !response.cod.is_ok() {
        return Err(ActivityError::ServiceRejected(response.cod.code()));
    }

    let list = response.list.ok_or_else(|| malformed("forecast response has no entry list"))?;
    let mut entries =
        list.into_iter().map(entry_from_day).collect::<Result<Vec<_>, ActivityError>>()?;
    entries.sort_by_key(|entry| entry.date);
    Ok(entries)
}

fn entry_from_day(day: OwForecastDay) -> Result<ForecastEntry, ActivityError> {
    let cond = day.weather.first().ok_or_else(|| malformed("weather conditions are empty"))?;
    let condition =
        conditions::describe(cond.id).ok_or(ActivityError::UnknownConditionCode(cond.id))?;
    let date = timestamp(day.dt)?;

    Ok(ForecastEntry {
        date,
        temp_day_k: day.temp.day,
        temp_night_k: day.temp.night,
        pressure_hpa: optional_reading("pressure", day.pressure)?,
        humidity_pct: optional_reading("humidity", day.humidity)?,
        clouds_pct: optional_reading("clouds", day.clouds)?,
        wind_mps: optional_reading("wind speed", day.speed)?,
        condition_code: cond.id,
        condition,
        icon: cond.icon.clone(),
    })
}

fn timestamp(epoch: i64) -> Result<DateTime<Utc>, ActivityError> {
    DateTime::from_timestamp(epoch, 0)
        .ok_or_else(|| malformed(format!("timestamp {epoch} is out of range")))
}

fn optional_reading(field: &str, value: Option<f64>) -> Result<Option<f64>, ActivityError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        Some(v) => Err(malformed(format!("{field} reading {v} is not a valid measurement"))),
    }
}

fn malformed(detail: impl Into<String>) -> ActivityError {
    ActivityError::MalformedPayload(detail.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{DAILY_LONDON, SEARCH_LONDON};
    use chrono::TimeZone;

    #[test]
    fn search_parses_every_candidate_in_order() {
        let records = parse_search(SEARCH_LONDON.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, 2643743);
        assert_eq!(records[1].id, 6058560);
        assert_eq!(records[2].id, 3456068);
    }

    #[test]
    fn first_candidate_field_for_field() {
        let records = parse_search(SEARCH_LONDON.as_bytes()).unwrap();
        let london = &records[0];

        assert_eq!(london.name, "London");
        assert_eq!(london.country, "GB");
        assert_eq!(london.observed_at, Utc.timestamp_opt(1370000000, 0).unwrap());
        assert_eq!(london.temp_k, 289.76);
        assert_eq!(london.temp_min_k, 288.71);
        assert_eq!(london.temp_max_k, 290.93);
        assert_eq!(london.pressure_hpa, Some(1011.0));
        assert_eq!(london.humidity_pct, Some(63.0));
        assert_eq!(london.clouds_pct, Some(32.0));
        assert_eq!(london.wind_mps, Some(4.1));
        assert_eq!(london.condition_code, 802);
        assert_eq!(london.condition, "scattered clouds");
        assert_eq!(london.icon.as_deref(), Some("03d"));
        assert!(london.daily_forecast.is_empty());
        assert_eq!(london.place_label(), "London, GB");
    }

    #[test]
    fn parsing_is_deterministic() {
        let first = parse_search(SEARCH_LONDON.as_bytes()).unwrap();
        let second = parse_search(SEARCH_LONDON.as_bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn absent_optional_readings_become_none() {
        let records = parse_search(SEARCH_LONDON.as_bytes()).unwrap();
        let london_ca = &records[1];

        assert_eq!(london_ca.pressure_hpa, None);
        assert_eq!(london_ca.humidity_pct, None);
        assert_eq!(london_ca.clouds_pct, None);
        assert_eq!(london_ca.wind_mps, None);
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let body = r#"{"cod": "200", "list": [
            {"id": 1, "dt": 1370000000, "sys": {"country": "GB"},
             "main": {"temp": 280.0, "temp_min": 279.0, "temp_max": 281.0},
             "weather": [{"id": 800}]}
        ]}"#;
        let err = parse_search(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ActivityError::MalformedPayload(_)), "got {err:?}");
    }

    #[test]
    fn unknown_condition_code_is_not_dropped() {
        let body = r#"{"cod": "200", "list": [
            {"id": 1, "name": "Nowhere", "dt": 1370000000, "sys": {"country": "XX"},
             "main": {"temp": 280.0, "temp_min": 279.0, "temp_max": 281.0},
             "weather": [{"id": 999}]}
        ]}"#;
        let err = parse_search(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ActivityError::UnknownConditionCode(999)));
    }

    #[test]
    fn negative_optional_reading_is_malformed() {
        let body = r#"{"cod": "200", "list": [
            {"id": 1, "name": "Nowhere", "dt": 1370000000, "sys": {"country": "XX"},
             "main": {"temp": 280.0, "temp_min": 279.0, "temp_max": 281.0,
                      "pressure": -1},
             "weather": [{"id": 800}]}
        ]}"#;
        let err = parse_search(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ActivityError::MalformedPayload(_)));
    }

    #[test]
    fn rejected_cod_fails_the_parse() {
        let body = r#"{"cod": "404", "message": "not found"}"#;
        let err = parse_search(body.as_bytes()).unwrap_err();
        match err {
            ActivityError::ServiceRejected(code) => assert_eq!(code, "404"),
            other => panic!("expected ServiceRejected, got {other:?}"),
        }
    }

    #[test]
    fn numeric_cod_is_accepted() {
        let body = r#"{"cod": 200, "list": []}"#;
        let records = parse_search(body.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_search(b"<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, ActivityError::MalformedPayload(_)));
    }

    #[test]
    fn daily_parses_seven_entries_in_date_order() {
        let entries = parse_daily(DAILY_LONDON.as_bytes()).unwrap();
        assert_eq!(entries.len(), 7);
        assert!(entries.windows(2).all(|pair| pair[0].date < pair[1].date));
        assert_eq!(entries[0].temp_day_k, 290.4);
        assert_eq!(entries[0].temp_night_k, 283.1);
        assert_eq!(entries[0].condition, "few clouds");
    }

    #[test]
    fn daily_entries_are_sorted_even_when_the_api_is_not() {
        let body = r#"{"cod": "200", "list": [
            {"dt": 1370174400, "temp": {"day": 289.2, "night": 282.5},
             "weather": [{"id": 500, "icon": "10d"}]},
            {"dt": 1370001600, "temp": {"day": 290.4, "night": 283.1},
             "weather": [{"id": 801, "icon": "02d"}]},
            {"dt": 1370088000, "temp": {"day": 291.9, "night": 284.0},
             "weather": [{"id": 800, "icon": "01d"}]}
        ]}"#;
        let entries = parse_daily(body.as_bytes()).unwrap();
        let dates: Vec<i64> = entries.iter().map(|e| e.date.timestamp()).collect();
        assert_eq!(dates, vec![1370001600, 1370088000, 1370174400]);
    }

    #[test]
    fn daily_with_missing_list_is_malformed() {
        let err = parse_daily(br#"{"cod": "200"}"#).unwrap_err();
        assert!(matches!(err, ActivityError::MalformedPayload(_)));
    }
}
