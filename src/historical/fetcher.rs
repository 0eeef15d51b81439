use crate::config::DwdConfig;
use crate::historical::archive::extract_product_file;
use crate::historical::error::{ArchiveError, HistoricalError, ProductError};
use crate::historical::locator::find_archive_filename;
use crate::historical::series::HistoricalSeries;
use crate::transport::{get_bytes, get_text};
use crate::types::daily_record::DailyRecord;
use crate::types::date_window::DateWindow;
use crate::types::summary::SeriesSummary;
use log::{debug, info};
use reqwest::Client;
use tokio::task;

/// Downloads and parses the "recent" daily archive of a station.
pub struct HistoricalFetcher {
    client: Client,
    config: DwdConfig,
}

impl HistoricalFetcher {
    pub fn new(client: Client, config: DwdConfig) -> Self {
        Self { client, config }
    }

    /// Fetches the records of `station` within `window`, newest first, and their summary.
    ///
    /// Each stage (listing, download, unpacking, schema check) is all or
    /// nothing. Individual rows with unreadable dates are dropped silently.
    pub async fn fetch(
        &self,
        station: &str,
        window: DateWindow,
    ) -> Result<HistoricalSeries, HistoricalError> {
        let listing_url = &self.config.archive_base_url;
        let listing = get_text(&self.client, listing_url, self.config.listing_timeout).await?;

        let archive_name = find_archive_filename(&listing, station).ok_or_else(|| {
            HistoricalError::StationFileNotFound {
                station: station.to_string(),
            }
        })?;

        let archive_url = format!("{}{}", listing_url, archive_name);
        info!("Downloading archive for station {} from {}", station, archive_url);
        let archive_bytes =
            get_bytes(&self.client, &archive_url, &[], self.config.archive_timeout).await?;

        let (product_name, ascending) = task::spawn_blocking({
            let station = station.to_string();
            let archive_name = archive_name.clone();
            move || decode_archive(&station, &archive_name, &archive_bytes, &window)
        })
        .await??;
        debug!("Decoded {} from {}", product_name, archive_name);

        let summary = SeriesSummary::from_records(&ascending);
        let mut records = ascending;
        records.reverse();
        info!(
            "Parsed {} records for station {} between {} and {}",
            records.len(),
            station,
            window.start,
            window.end
        );

        Ok(HistoricalSeries {
            station: station.to_string(),
            window,
            records,
            summary,
        })
    }
}

/// Unpacks an archive and parses its product file. Runs on the blocking pool.
///
/// Returns the product file name with its records in ascending date order.
fn decode_archive(
    station: &str,
    archive_name: &str,
    archive_bytes: &[u8],
    window: &DateWindow,
) -> Result<(String, Vec<DailyRecord>), HistoricalError> {
    let malformed = |source: ArchiveError| HistoricalError::MalformedArchive {
        station: station.to_string(),
        archive: archive_name.to_string(),
        source,
    };

    let product = extract_product_file(archive_bytes).map_err(malformed)?;
    debug!(
        "Extracted {} ({} bytes) from {}",
        product.name,
        product.bytes.len(),
        archive_name
    );

    let records = product.parse(window).map_err(|e| match e {
        ProductError::MissingDateColumn => HistoricalError::UnrecognizedSchema {
            station: station.to_string(),
            file: product.name.clone(),
        },
        ProductError::Decode(source) => malformed(ArchiveError::ProductDecode {
            file: product.name.clone(),
            source,
        }),
    })?;

    Ok((product.name, records))
}
