//! The daily part of an Open-Meteo forecast response and its conversion into
//! [`DailyRecord`]s.

use crate::types::daily_record::{DailyRecord, Origin};
use chrono::NaiveDate;
use serde::Deserialize;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Daily fields requested from the forecast service, comma separated.
pub const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,sunshine_duration,wind_gusts_10m_max";

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub daily: DailyForecast,
}

/// Parallel arrays indexed by day offset. Any entry may be `null`.
#[derive(Debug, Default, Deserialize)]
pub struct DailyForecast {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    /// Seconds of sunshine.
    #[serde(default)]
    pub sunshine_duration: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_gusts_10m_max: Vec<Option<f64>>,
}

fn at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

impl DailyForecast {
    /// Converts the first `days_ahead` days into records, keeping the service's
    /// ascending order.
    ///
    /// The mean temperature is the midpoint of max and min and is absent unless
    /// both are present. Sunshine is converted to hours and defaults to `0.0`
    /// when missing. Days whose date does not parse are dropped.
    pub fn into_records(self, days_ahead: usize) -> Vec<DailyRecord> {
        self.time
            .iter()
            .enumerate()
            .filter_map(|(idx, raw_date)| {
                let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").ok()?;
                let mean_temperature = match (
                    at(&self.temperature_2m_max, idx),
                    at(&self.temperature_2m_min, idx),
                ) {
                    (Some(max), Some(min)) => Some((max + min) / 2.0),
                    _ => None,
                };
                Some(DailyRecord {
                    date,
                    mean_temperature,
                    precipitation: at(&self.precipitation_sum, idx),
                    sunshine_hours: Some(
                        at(&self.sunshine_duration, idx).unwrap_or(0.0) / SECONDS_PER_HOUR,
                    ),
                    max_wind_gust: at(&self.wind_gusts_10m_max, idx),
                    origin: Origin::Forecast,
                })
            })
            .take(days_ahead)
            .collect()
    }
}
