//! Endpoints, timeouts and the request ranges offered to dashboard users.

use bon::Builder;
use std::time::Duration;

/// Directory of the "recent" daily climate (KL) archives on the DWD open data server.
pub const DWD_ARCHIVE_BASE_URL: &str =
    "https://opendata.dwd.de/climate_environment/CDC/observations_germany/climate/daily/kl/recent/";

pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Historical windows offered to users, in days, with their labels.
pub const TIME_RANGES: [(u32, &str); 5] = [
    (30, "last 30 days"),
    (60, "last 60 days"),
    (90, "last 90 days"),
    (182, "last 6 months"),
    (365, "last year"),
];

/// Forecast horizons offered to users, in days, with their labels.
pub const FORECAST_RANGES: [(u32, &str); 3] = [
    (3, "next 3 days"),
    (7, "next 7 days"),
    (14, "next 14 days"),
];

pub const DEFAULT_DAYS: u32 = 30;
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

/// Remote endpoints and per-call timeouts.
///
/// ```
/// use dwd_climate::DwdConfig;
/// use std::time::Duration;
///
/// let config = DwdConfig::builder()
///     .archive_timeout(Duration::from_secs(60))
///     .build();
/// assert_eq!(config.listing_timeout, Duration::from_secs(10));
/// assert_eq!(config.archive_timeout, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DwdConfig {
    /// Directory listing URL. Archive URLs are this plus the archive file name,
    /// so it must end with a slash.
    #[builder(into, default = DWD_ARCHIVE_BASE_URL.to_string())]
    pub archive_base_url: String,

    #[builder(into, default = OPEN_METEO_FORECAST_URL.to_string())]
    pub forecast_url: String,

    /// Forecast model selector. `icon_seamless` is the DWD ICON model family.
    #[builder(into, default = "icon_seamless".to_string())]
    pub forecast_model: String,

    /// Timezone the forecast service uses to cut days.
    #[builder(into, default = "Europe/Berlin".to_string())]
    pub timezone: String,

    #[builder(default = Duration::from_secs(10))]
    pub listing_timeout: Duration,

    /// The archives are a few hundred kilobytes, so they get more time.
    #[builder(default = Duration::from_secs(30))]
    pub archive_timeout: Duration,

    #[builder(default = Duration::from_secs(10))]
    pub forecast_timeout: Duration,
}

impl Default for DwdConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Interprets a raw `days` request value. Anything that does not parse or is
/// not one of [`TIME_RANGES`] yields [`DEFAULT_DAYS`].
pub fn resolve_days_back(raw: Option<&str>) -> u32 {
    resolve_range(raw, &TIME_RANGES, DEFAULT_DAYS)
}

/// Like [`resolve_days_back`], for [`FORECAST_RANGES`].
pub fn resolve_forecast_days(raw: Option<&str>) -> u32 {
    resolve_range(raw, &FORECAST_RANGES, DEFAULT_FORECAST_DAYS)
}

fn resolve_range(raw: Option<&str>, ranges: &[(u32, &str)], default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|days| ranges.iter().any(|(offered, _)| offered == days))
        .unwrap_or(default)
}
