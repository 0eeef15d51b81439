use crate::transport::TransportError;
use thiserror::Error;

/// A failed forecast query. Logged by the fetcher, never returned to callers.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to parse forecast JSON")]
    JsonParse(#[from] serde_json::Error),
}
