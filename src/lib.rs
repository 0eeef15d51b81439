mod build_info;
mod chart;
mod config;
mod dwd;
mod error;
mod forecast;
mod historical;
mod transport;
mod types;
mod values;

pub use build_info::BuildInfo;
pub use chart::{build_chart, ChartSpec, LineStyle, Marker, Trace, TraceKind};
pub use config::*;
pub use dwd::*;
pub use error::DwdError;
pub use values::{parse_observed_value, parse_observed_value_with_threshold, SENTINEL_THRESHOLD};

pub use types::daily_record::{DailyRecord, Origin, RecordDisplay};
pub use types::date_window::DateWindow;
pub use types::station::{LatLon, Station, StationRegistry, DEFAULT_STATION_ID};
pub use types::summary::SeriesSummary;

pub use historical::archive::{extract_product_file, ProductFile, PRODUCT_FILE_PREFIX};
pub use historical::fetcher::HistoricalFetcher;
pub use historical::locator::{archive_suffix, find_archive_filename};
pub use historical::product::{parse_archive_date, parse_product};
pub use historical::series::HistoricalSeries;

pub use forecast::fetcher::ForecastFetcher;
pub use forecast::response::{DailyForecast, ForecastResponse};

pub use forecast::error::ForecastError;
pub use historical::error::{ArchiveError, HistoricalError, ProductError};
pub use transport::TransportError;
