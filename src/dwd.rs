//! The main entry point: a client that fetches the historical series and the
//! forecast of a DWD station and combines them for display.

use crate::chart::{build_chart, ChartSpec};
use crate::config::{DwdConfig, DEFAULT_DAYS, DEFAULT_FORECAST_DAYS};
use crate::error::DwdError;
use crate::forecast::fetcher::ForecastFetcher;
use crate::historical::error::HistoricalError;
use crate::historical::fetcher::HistoricalFetcher;
use crate::historical::series::HistoricalSeries;
use crate::types::daily_record::DailyRecord;
use crate::types::date_window::DateWindow;
use crate::types::station::StationRegistry;
use bon::bon;
use chrono::{Local, NaiveDate};
use log::info;
use reqwest::Client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Everything the dashboard shows for one station and one request.
#[derive(Debug)]
pub struct StationOverview {
    pub station_id: String,
    /// Display name from the station registry, if the station is listed there.
    pub station_name: Option<String>,
    pub days_back: u32,
    pub days_ahead: u32,
    /// The historical series, or the reason it is unavailable.
    pub historical: Result<HistoricalSeries, HistoricalError>,
    /// Forecast records, oldest first. Empty when no forecast is available.
    pub forecast: Vec<DailyRecord>,
    /// Present when the historical series is present and not empty.
    pub chart: Option<ChartSpec>,
}

impl StationOverview {
    /// The message to show in place of the historical table, if any.
    pub fn error_message(&self) -> Option<String> {
        self.historical.as_ref().err().map(ToString::to_string)
    }
}

/// Client for DWD station climate data.
///
/// # Examples
///
/// ```no_run
/// # use dwd_climate::{Dwd, DwdError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DwdError> {
/// let client = Dwd::new()?;
///
/// let series = client
///     .historical()
///     .station("02667")
///     .days_back(30)
///     .call()
///     .await?;
/// println!("Average temperature: {}", series.summary.average_temperature);
///
/// let forecast = client.forecast().station("02667").days_ahead(7).call().await;
/// println!("{} forecast days", forecast.len());
/// # Ok(())
/// # }
/// ```
pub struct Dwd {
    historical: HistoricalFetcher,
    forecast: ForecastFetcher,
    stations: StationRegistry,
}

#[bon]
impl Dwd {
    /// Creates a client with the default endpoints and station table.
    pub fn new() -> Result<Self, DwdError> {
        Self::with_config(DwdConfig::default(), StationRegistry::default())
    }

    /// Creates a client with custom endpoints, timeouts and stations.
    ///
    /// # Errors
    ///
    /// Returns [`DwdError::ClientBuild`] if the HTTP client cannot be set up
    /// (e.g. the TLS backend fails to initialise).
    pub fn with_config(config: DwdConfig, stations: StationRegistry) -> Result<Self, DwdError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(DwdError::ClientBuild)?;
        Ok(Self {
            historical: HistoricalFetcher::new(client.clone(), config.clone()),
            forecast: ForecastFetcher::new(client, config, stations.clone()),
            stations,
        })
    }

    pub fn stations(&self) -> &StationRegistry {
        &self.stations
    }

    /// Fetches the historical series of a station.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station(&str)`: **Required.** DWD station id, e.g. `"02667"`.
    /// * `.days_back(u32)`: Optional. Length of the window ending today. Defaults to 30.
    /// * `.today(NaiveDate)`: Optional. The window's end date. Defaults to the local date.
    ///
    /// # Errors
    ///
    /// Any [`HistoricalError`]; no partial series is returned.
    #[builder]
    pub async fn historical(
        &self,
        station: &str,
        days_back: Option<u32>,
        today: Option<NaiveDate>,
    ) -> Result<HistoricalSeries, HistoricalError> {
        let window = window(today, days_back.unwrap_or(DEFAULT_DAYS));
        self.historical.fetch(station, window).await
    }

    /// Fetches the forecast of a station.
    ///
    /// * `.station(&str)`: **Required.**
    /// * `.days_ahead(u32)`: Optional. Defaults to 7.
    ///
    /// Never fails. Stations without coordinates and unreachable services both
    /// yield an empty `Vec`.
    #[builder]
    pub async fn forecast(&self, station: &str, days_ahead: Option<u32>) -> Vec<DailyRecord> {
        self.forecast
            .fetch(station, days_ahead.unwrap_or(DEFAULT_FORECAST_DAYS))
            .await
    }

    /// Fetches historical data and forecast concurrently and builds the chart.
    #[builder]
    pub async fn overview(
        &self,
        station: &str,
        days_back: Option<u32>,
        days_ahead: Option<u32>,
        today: Option<NaiveDate>,
    ) -> StationOverview {
        let days_back = days_back.unwrap_or(DEFAULT_DAYS);
        let days_ahead = days_ahead.unwrap_or(DEFAULT_FORECAST_DAYS);

        let (historical, forecast) = tokio::join!(
            self.historical.fetch(station, window(today, days_back)),
            self.forecast.fetch(station, days_ahead)
        );

        let chart = historical
            .as_ref()
            .ok()
            .filter(|series| !series.is_empty())
            .and_then(|series| build_chart(&series.chronological(), &forecast));

        info!(
            "Overview for station {}: historical {}, {} forecast days",
            station,
            match &historical {
                Ok(series) => format!("{} days", series.records.len()),
                Err(e) => format!("failed ({})", e),
            },
            forecast.len()
        );

        StationOverview {
            station_id: station.to_string(),
            station_name: self.stations.get(station).map(|s| s.name.clone()),
            days_back,
            days_ahead,
            historical,
            forecast,
            chart,
        }
    }
}

fn window(today: Option<NaiveDate>, days_back: u32) -> DateWindow {
    DateWindow::last_days(today.unwrap_or_else(|| Local::now().date_naive()), days_back)
}
