//! Defines [`DailyRecord`], the single row shape shared by the historical archive
//! and the forecast service, together with its display formatting.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Where a [`DailyRecord`] came from.
///
/// Charts render historical rows as solid lines and forecast rows as dotted or
/// translucent marks. The statistics never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Measured by the station and published in the DWD archive.
    Historical,
    /// Predicted by the forecast service.
    Forecast,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Historical => write!(f, "historical"),
            Origin::Forecast => write!(f, "forecast"),
        }
    }
}

/// One calendar day of observed or forecast weather.
///
/// Every measurement is optional: a `None` means the source had no usable value
/// for that day (a missing field or a sentinel code such as `-999`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// The day this record describes. Unique within one series.
    pub date: NaiveDate,
    /// Daily mean air temperature in °C.
    pub mean_temperature: Option<f64>,
    /// Daily precipitation total in mm.
    pub precipitation: Option<f64>,
    /// Sunshine duration in hours.
    pub sunshine_hours: Option<f64>,
    /// Maximum wind gust, in whatever unit the source publishes.
    pub max_wind_gust: Option<f64>,
    pub origin: Origin,
}

/// Pre-formatted strings for showing a [`DailyRecord`] in a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDisplay {
    /// `dd.mm.yyyy`
    pub date: String,
    pub temperature: String,
    pub precipitation: String,
    pub sunshine: String,
    pub wind: String,
}

const ABSENT_MARKER: &str = "-";

fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| ABSENT_MARKER.to_string())
}

impl DailyRecord {
    /// Formats the record for table display. Absent values render as `-`.
    pub fn display(&self) -> RecordDisplay {
        RecordDisplay {
            date: self.date.format("%d.%m.%Y").to_string(),
            temperature: format_optional(self.mean_temperature, 1),
            precipitation: format_optional(self.precipitation, 1),
            sunshine: format_optional(self.sunshine_hours, 2),
            wind: format_optional(self.max_wind_gust, 1),
        }
    }

    pub fn is_forecast(&self) -> bool {
        self.origin == Origin::Forecast
    }
}
