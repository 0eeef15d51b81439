use crate::types::daily_record::DailyRecord;
use serde::Serialize;

/// Aggregate statistics over one historical window.
///
/// Recomputed for every request. All three figures are rounded to two decimals
/// and are `0.0` when no value contributed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub average_temperature: f64,
    pub total_precipitation: f64,
    pub total_sunshine: f64,
}

impl SeriesSummary {
    /// Computes the summary of `records`.
    ///
    /// The mean temperature covers every present temperature. The precipitation
    /// and sunshine totals only accumulate present values that are non-zero,
    /// mirroring the archive dashboard's truthiness check. Both rules are pinned
    /// by tests; see DESIGN.md before changing either.
    pub fn from_records(records: &[DailyRecord]) -> Self {
        let mut temperature_sum = 0.0;
        let mut temperature_count = 0usize;
        let mut total_precipitation = 0.0;
        let mut total_sunshine = 0.0;

        for record in records {
            if let Some(temperature) = record.mean_temperature {
                temperature_sum += temperature;
                temperature_count += 1;
            }
            if let Some(rain) = record.precipitation.filter(|v| *v != 0.0) {
                total_precipitation += rain;
            }
            if let Some(sun) = record.sunshine_hours.filter(|v| *v != 0.0) {
                total_sunshine += sun;
            }
        }

        let average_temperature = if temperature_count > 0 {
            round2(temperature_sum / temperature_count as f64)
        } else {
            0.0
        };

        SeriesSummary {
            average_temperature,
            total_precipitation: round2(total_precipitation),
            total_sunshine: round2(total_sunshine),
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
