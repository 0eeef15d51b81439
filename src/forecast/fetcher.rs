use crate::config::DwdConfig;
use crate::forecast::error::ForecastError;
use crate::forecast::response::{ForecastResponse, DAILY_FIELDS};
use crate::transport::get_bytes;
use crate::types::daily_record::DailyRecord;
use crate::types::station::{LatLon, StationRegistry};
use log::{debug, warn};
use reqwest::Client;

/// Queries the forecast service for the stations of a [`StationRegistry`].
pub struct ForecastFetcher {
    client: Client,
    config: DwdConfig,
    stations: StationRegistry,
}

impl ForecastFetcher {
    pub fn new(client: Client, config: DwdConfig, stations: StationRegistry) -> Self {
        Self {
            client,
            config,
            stations,
        }
    }

    /// Returns up to `days_ahead` forecast records for `station`, oldest first.
    ///
    /// Never fails: a station without coordinates yields an empty sequence, and
    /// any transport or decoding error is logged and also yields an empty
    /// sequence, so the historical view is never blocked by the forecast.
    pub async fn fetch(&self, station: &str, days_ahead: u32) -> Vec<DailyRecord> {
        let Some(location) = self.stations.coordinates(station) else {
            debug!("No coordinates for station {}, skipping forecast", station);
            return Vec::new();
        };

        match self.query(location, days_ahead).await {
            Ok(records) => {
                debug!("Received {} forecast days for station {}", records.len(), station);
                records
            }
            Err(e) => {
                warn!("Forecast for station {} unavailable: {}", station, e);
                Vec::new()
            }
        }
    }

    /// The raw query, with errors. The service is always asked for at least one day.
    pub async fn query(
        &self,
        location: LatLon,
        days_ahead: u32,
    ) -> Result<Vec<DailyRecord>, ForecastError> {
        let params = [
            ("latitude", location.0.to_string()),
            ("longitude", location.1.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", self.config.timezone.clone()),
            ("models", self.config.forecast_model.clone()),
            ("forecast_days", days_ahead.max(1).to_string()),
        ];
        let body = get_bytes(
            &self.client,
            &self.config.forecast_url,
            &params,
            self.config.forecast_timeout,
        )
        .await?;
        let response: ForecastResponse = serde_json::from_slice(&body)?;
        Ok(response.daily.into_records(days_ahead as usize))
    }
}
