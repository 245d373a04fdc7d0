//! Plain-text rendering of the normalized weather model.
//!
//! Pure functions: the widgets of a richer front-end would consume the same
//! data the same way. Absent optional readings render as blank cells.

use skycast_core::{ForecastEntry, Scales, WeatherRecord};

/// One line per candidate: place, condition, temperature span and the
/// optional readings.
pub fn results_table(records: &[WeatherRecord], scales: &Scales) -> String {
    let mut out = String::new();
    for record in records {
        let temp = scales.temp.convert(record.temp_k);
        let min = scales.temp.convert(record.temp_min_k);
        let max = scales.temp.convert(record.temp_max_k);

        out.push_str(&format!(
            "{:<24} {:<28} {:>6}{} (from {}{} to {}{})",
            record.place_label(),
            record.condition,
            temp,
            scales.temp,
            min,
            scales.temp,
            max,
            scales.temp,
        ));
        push_readings(&mut out, record.wind_mps, record.clouds_pct, record.pressure_hpa,
            record.humidity_pct, scales);
        out.push('\n');
    }
    out
}

/// The header panel of the forecast view: place, observation time,
/// condition, the big temperature and the optional readings block.
pub fn current_conditions(record: &WeatherRecord, scales: &Scales) -> String {
    let temp = scales.temp.convert(record.temp_k);
    format!(
        "{}\n{} {}\n\n  {} {}\n\nWind: {}\nClouds: {}\nPressure: {}\nHumidity: {}\n",
        record.place_label(),
        record.observed_at.format("%A %H:%M"),
        record.condition,
        temp,
        scales.temp,
        reading(record.wind_mps, scales.wind),
        whole_reading(record.clouds_pct, scales.clouds),
        reading(record.pressure_hpa, scales.pressure),
        whole_reading(record.humidity_pct, scales.humidity),
    )
}

/// One line per forecast day: date, day/night temperatures, condition and
/// the optional readings.
pub fn forecast_table(entries: &[ForecastEntry], scales: &Scales) -> String {
    let mut out = String::new();
    for entry in entries {
        let day = scales.temp.convert(entry.temp_day_k);
        let night = scales.temp.convert(entry.temp_night_k);

        out.push_str(&format!(
            "{:<8} {:>6}{} / {}{:<4} {:<28}",
            entry.date.format("%b %e"),
            day,
            scales.temp,
            night,
            scales.temp,
            entry.condition,
        ));
        push_readings(&mut out, entry.wind_mps, entry.clouds_pct, entry.pressure_hpa,
            entry.humidity_pct, scales);
        out.push('\n');
    }
    out
}

fn push_readings(
    out: &mut String,
    wind: Option<f64>,
    clouds: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
    scales: &Scales,
) {
    out.push_str(&format!(
        " {:>10} {:>6} {:>10} {:>6}",
        reading(wind, scales.wind),
        whole_reading(clouds, scales.clouds),
        reading(pressure, scales.pressure),
        whole_reading(humidity, scales.humidity),
    ));
}

fn reading(value: Option<f64>, unit: &str) -> String {
    value.map(|v| format!("{v} {unit}")).unwrap_or_default()
}

fn whole_reading(value: Option<f64>, unit: &str) -> String {
    value.map(|v| format!("{v:.0} {unit}")).unwrap_or_default()
}
