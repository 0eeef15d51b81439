use crate::historical::error::HistoricalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DwdError {
    #[error(transparent)]
    Historical(#[from] HistoricalError),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
