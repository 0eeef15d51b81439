use crate::transport::TransportError;
use polars::error::PolarsError;
use thiserror::Error;
use zip::result::ZipError;

/// Why a downloaded station archive could not be used.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to open ZIP archive")]
    Zip(#[from] ZipError),

    #[error("Failed to read archive entry '{0}'")]
    EntryRead(String, #[source] std::io::Error),

    #[error("Archive contains no product data file")]
    NoProductFile,

    #[error("Archive contains more than one product data file: {0:?}")]
    AmbiguousProductFile(Vec<String>),

    #[error("Failed to decode product data file '{file}'")]
    ProductDecode {
        file: String,
        #[source]
        source: PolarsError,
    },
}

/// Why a product file could not be turned into records.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("CSV decoding failed")]
    Decode(#[from] PolarsError),

    #[error("Neither MESS_DATUM nor MESS_DATUM_BEGINN column present")]
    MissingDateColumn,
}

/// Terminal failure of a historical fetch. No partial series accompanies it.
///
/// The `Display` output is meant to be shown to the user as is.
#[derive(Debug, Error)]
pub enum HistoricalError {
    #[error("File for station {station} not found on server.")]
    StationFileNotFound { station: String },

    #[error("Archive '{archive}' for station {station} is malformed")]
    MalformedArchive {
        station: String,
        archive: String,
        #[source]
        source: ArchiveError,
    },

    #[error("Data file '{file}' for station {station} has no recognised date column")]
    UnrecognizedSchema { station: String, file: String },

    #[error(transparent)]
    TransportFailure(#[from] TransportError),

    #[error("Background decoding task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
